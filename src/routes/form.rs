use axum::response::Html;

const UPLOAD_FORM: &str = include_str!("../../static/upload.html");

/// The browser-side form that posts to `/api/upload`.
pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}
