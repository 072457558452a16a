use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::routes::errors::ApiError;
use crate::services::oauth::google::service::UPLOAD_SCOPES;
use crate::state::AppState;

pub const AUTHORIZED_MESSAGE: &str =
    "Authorization successful! Save this refresh token to your environment variables:";
pub const STORE_TOKEN_INSTRUCTIONS: &str =
    "Add this to your .env file as GOOGLE_REFRESH_TOKEN, then restart the server";

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedResponse {
    pub success: bool,
    pub message: String,
    pub refresh_token: String,
    pub instructions: String,
}

/// Sends the browser to Google's consent screen.
pub async fn start_authorization(State(state): State<AppState>) -> Result<Response, ApiError> {
    let credentials = state.config.oauth_credentials()?;

    let url = state
        .google_oauth
        .authorization_url(&credentials, UPLOAD_SCOPES)
        .map_err(|err| {
            error!(%err, "failed to build authorization url");
            ApiError::Configuration(err.to_string())
        })?;

    info!(redirect_uri = %credentials.redirect_uri, "redirecting to google consent");
    Ok((StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response())
}

/// Exchanges the authorization code and shows the refresh token to the
/// operator. The access token never leaves this handler.
pub async fn authorization_callback(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        ApiError::Validation(format!("Invalid query string: {}", rejection.body_text()))
    })?;

    // Only the first `code` counts when the parameter is repeated.
    let code = params
        .into_iter()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("No authorization code provided".to_string()))?;

    let credentials = state.config.oauth_credentials()?;

    let tokens = state
        .google_oauth
        .exchange_code(&credentials, &code)
        .await
        .map_err(ApiError::TokenExchange)?;

    info!("authorization code exchanged; refresh token issued");
    Ok(Json(AuthorizedResponse {
        success: true,
        message: AUTHORIZED_MESSAGE.to_string(),
        refresh_token: tokens.refresh_token,
        instructions: STORE_TOKEN_INSTRUCTIONS.to_string(),
    })
    .into_response())
}
