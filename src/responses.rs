use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl JsonResponse {
    fn error_body(msg: &str, details: Option<&str>) -> Json<JsonResponse> {
        Json(JsonResponse {
            success: false,
            message: None,
            error: Some(msg.to_string()),
            details: details.map(|d| d.to_string()),
        })
    }

    pub fn success(msg: &str) -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(JsonResponse {
                success: true,
                message: Some(msg.to_string()),
                error: None,
                details: None,
            }),
        )
    }

    pub fn bad_request(msg: &str) -> impl IntoResponse {
        (StatusCode::BAD_REQUEST, Self::error_body(msg, None))
    }

    pub fn unauthorized(msg: &str) -> impl IntoResponse {
        (StatusCode::UNAUTHORIZED, Self::error_body(msg, None))
    }

    pub fn server_error(msg: &str) -> impl IntoResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, Self::error_body(msg, None))
    }

    pub fn server_error_with_details(msg: &str, details: &str) -> impl IntoResponse {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Self::error_body(msg, Some(details)),
        )
    }

    pub fn too_many_requests(msg: &str) -> impl IntoResponse {
        (StatusCode::TOO_MANY_REQUESTS, Self::error_body(msg, None))
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;
    use serde_json::{from_slice, Value};

    use crate::responses::JsonResponse;

    #[tokio::test]
    async fn test_success_response() {
        let resp = JsonResponse::success("ok").into_response();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: JsonResponse = from_slice(&body).unwrap();
        assert!(json.success);
        assert_eq!(json.message.as_deref(), Some("ok"));
        assert!(json.error.is_none());
    }

    #[tokio::test]
    async fn test_bad_request_response() {
        let resp = JsonResponse::bad_request("nope").into_response();
        assert_eq!(resp.status(), axum::http::StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: Value = from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "nope");
        assert!(json.get("details").is_none());
        assert!(json.get("message").is_none());
    }

    #[tokio::test]
    async fn test_server_error_with_details() {
        let resp =
            JsonResponse::server_error_with_details("Failed", "invalid_grant").into_response();
        assert_eq!(
            resp.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: JsonResponse = from_slice(&body).unwrap();
        assert!(!json.success);
        assert_eq!(json.error.as_deref(), Some("Failed"));
        assert_eq!(json.details.as_deref(), Some("invalid_grant"));
    }
}
