use crate::models::oauth::{OAuthCredentials, TokenPair};
use crate::services::oauth::google::errors::GoogleAuthError;
use async_trait::async_trait;
use reqwest::Url;

pub const YOUTUBE_UPLOAD_SCOPE: &str = "https://www.googleapis.com/auth/youtube.upload";
pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube";

/// Scopes requested during consent: upload videos and manage the channel.
pub const UPLOAD_SCOPES: &[&str] = &[YOUTUBE_UPLOAD_SCOPE, YOUTUBE_SCOPE];

#[async_trait]
pub trait GoogleOAuthService: Send + Sync {
    /// Consent URL asking for offline access with a forced consent prompt, so
    /// Google always hands back a refresh token.
    fn authorization_url(
        &self,
        credentials: &OAuthCredentials,
        scopes: &[&str],
    ) -> Result<Url, GoogleAuthError>;

    async fn exchange_code(
        &self,
        credentials: &OAuthCredentials,
        code: &str,
    ) -> Result<TokenPair, GoogleAuthError>;

    /// Returns a short-lived access token.
    async fn refresh_access_token(
        &self,
        credentials: &OAuthCredentials,
        refresh_token: &str,
    ) -> Result<String, GoogleAuthError>;
}
