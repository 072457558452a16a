pub mod auth;
pub mod errors;
pub mod form;
pub mod upload;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use governor::middleware::StateInformationMiddleware;
use tower_governor::{
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::PeerIpKeyExtractor,
};

use crate::config::RateLimitSettings;
use crate::responses::JsonResponse;
use crate::state::AppState;

pub const TOO_MANY_REQUESTS: &str = "Too many requests. Please wait a moment and try again.";

pub type AuthRateLimit = GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Per-peer-IP limiter for `/api/auth/*`. Rejections get a JSON 429 body.
pub fn auth_rate_limit(settings: &RateLimitSettings) -> anyhow::Result<Arc<AuthRateLimit>> {
    let config = GovernorConfigBuilder::default()
        .per_second(settings.auth_per_second)
        .burst_size(settings.auth_burst)
        .use_headers()
        .error_handler(|_err| JsonResponse::too_many_requests(TOO_MANY_REQUESTS).into_response())
        .finish()
        .context("invalid auth rate limiter settings")?;

    Ok(Arc::new(config))
}

/// All application routes, without the transport layers (tracing, CORS)
/// that `main` stacks on top.
pub fn router(state: AppState) -> Router {
    router_with(state, |auth| auth)
}

/// Like [`router`], letting the caller wrap the `/api/auth` routes (the
/// server puts its stricter rate limiter there).
pub fn router_with<F>(state: AppState, wrap_auth: F) -> Router
where
    F: FnOnce(Router<AppState>) -> Router<AppState>,
{
    let upload_limit = state.config.max_upload_bytes;

    let auth_routes = Router::new()
        .route("/", get(auth::start_authorization))
        .route("/callback", get(auth::authorization_callback));

    let upload_routes = Router::new()
        .route("/", post(upload::upload_video))
        .layer(DefaultBodyLimit::max(upload_limit));

    Router::new()
        .route("/", get(form::upload_form))
        .route("/api/health", get(health))
        .nest("/api/auth", wrap_auth(auth_routes))
        .nest("/api/upload", upload_routes)
        .with_state(state)
}

async fn health() -> Response {
    JsonResponse::success("ok").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::oauth::google::mock_google_oauth::MockGoogleOAuth;
    use crate::services::youtube::service::MockYouTubeService;
    use crate::state::test_support::{test_config, test_state};
    use axum::{
        body::Body,
        extract::ConnectInfo,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use std::net::SocketAddr;
    use tower::ServiceExt;
    use tower_governor::GovernorLayer;

    fn from_peer(request: axum::http::request::Builder, port: u16) -> Request<Body> {
        request
            .extension(ConnectInfo(SocketAddr::from(([10, 0, 0, 7], port))))
            .body(Body::empty())
            .unwrap()
    }

    fn limited_router() -> Router {
        let mut youtube = MockYouTubeService::new();
        youtube.expect_create_video().never();
        let state = test_state(
            test_config(),
            Arc::new(MockGoogleOAuth::default()),
            Arc::new(youtube),
        );
        let limit = auth_rate_limit(&RateLimitSettings {
            auth_per_second: 60,
            auth_burst: 1,
        })
        .unwrap();

        router_with(state, |auth| auth.layer(GovernorLayer { config: limit }))
    }

    #[tokio::test]
    async fn auth_routes_are_rate_limited_per_peer() {
        let app = limited_router();

        let first = app
            .clone()
            .oneshot(from_peer(Request::get("/api/auth"), 5000))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::FOUND);

        let second = app
            .clone()
            .oneshot(from_peer(Request::get("/api/auth/callback?code=abc"), 5001))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = axum::body::to_bytes(second.into_body(), 4096).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn upload_and_health_are_not_rate_limited() {
        let app = limited_router();

        let limited = app
            .clone()
            .oneshot(from_peer(Request::get("/api/auth"), 5000))
            .await
            .unwrap();
        assert_eq!(limited.status(), StatusCode::FOUND);

        for _ in 0..3 {
            let upload = app
                .clone()
                .oneshot(from_peer(Request::post("/api/upload"), 5000))
                .await
                .unwrap();
            assert_eq!(upload.status(), StatusCode::BAD_REQUEST);

            let health = app
                .clone()
                .oneshot(from_peer(Request::get("/api/health"), 5000))
                .await
                .unwrap();
            assert_eq!(health.status(), StatusCode::OK);
        }
    }

    #[test]
    fn zero_burst_is_rejected() {
        let result = auth_rate_limit(&RateLimitSettings {
            auth_per_second: 1,
            auth_burst: 0,
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let state = test_state(
            test_config(),
            Arc::new(MockGoogleOAuth::default()),
            Arc::new(MockYouTubeService::new()),
        );

        let response = router(state)
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let state = test_state(
            test_config(),
            Arc::new(MockGoogleOAuth::default()),
            Arc::new(MockYouTubeService::new()),
        );

        let response = router(state)
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
