use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::responses::JsonResponse;
use crate::services::oauth::google::errors::GoogleAuthError;
use crate::services::youtube::errors::YouTubeError;

pub const TOKEN_EXCHANGE_FAILED: &str = "Failed to exchange authorization code";
pub const UPLOAD_AUTH_FAILED: &str =
    "Authentication failed. Please check your YouTube API credentials.";
pub const UPLOAD_FAILED: &str = "Failed to upload video";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Every failure a handler can end in. Status codes are chosen only in
/// `into_response`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Configuration(String),
    #[error("token exchange failed: {0}")]
    TokenExchange(GoogleAuthError),
    #[error("upload failed: {0}")]
    Upload(YouTubeError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => JsonResponse::bad_request(&msg).into_response(),
            ApiError::Configuration(msg) => {
                error!(message = %msg, "required configuration missing");
                JsonResponse::server_error(&msg).into_response()
            }
            ApiError::TokenExchange(err) => {
                error!(%err, "authorization code exchange failed");
                JsonResponse::server_error_with_details(TOKEN_EXCHANGE_FAILED, &err.to_string())
                    .into_response()
            }
            ApiError::Upload(err) => {
                error!(%err, "video upload failed");
                if err.is_credential_failure() {
                    return JsonResponse::unauthorized(UPLOAD_AUTH_FAILED).into_response();
                }
                let message = err.to_string();
                if message.trim().is_empty() {
                    JsonResponse::server_error(UPLOAD_FAILED).into_response()
                } else {
                    JsonResponse::server_error(&message).into_response()
                }
            }
            ApiError::Internal(err) => {
                error!(?err, "unhandled error");
                JsonResponse::server_error(INTERNAL_ERROR).into_response()
            }
        }
    }
}
