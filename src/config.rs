use std::{env, fmt, net::SocketAddr, str::FromStr};

use tracing::warn;

use crate::models::oauth::{OAuthCredentials, UploadCredentials};
use crate::routes::errors::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_UPLOAD_REDIRECT_URI: &str = "http://localhost:3000/api/auth/callback";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const YOUTUBE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/youtube/v3/videos";

pub const CALLBACK_PATH: &str = "/api/auth/callback";

const OAUTH_NOT_CONFIGURED: &str = "Google OAuth credentials not configured";
const UPLOAD_NOT_CONFIGURED: &str = "YouTube API credentials not configured. Please set GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET, and GOOGLE_REFRESH_TOKEN environment variables.";

#[derive(Clone, Default)]
pub struct GoogleSecrets {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for GoogleSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("GoogleSecrets")
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .field("refresh_token", &redacted(&self.refresh_token))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub upload_url: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            upload_url: YOUTUBE_UPLOAD_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub auth_per_second: u64,
    pub auth_burst: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub google: GoogleSecrets,
    pub endpoints: GoogleEndpoints,
    /// Base of the redirect URI sent while starting the consent flow.
    pub base_url: String,
    /// Redirect URI of the OAuth client used on the upload path. Kept separate
    /// from `base_url`; both must match what is registered with Google.
    pub upload_redirect_uri: String,
    pub bind_addr: SocketAddr,
    pub frontend_origin: Option<String>,
    pub max_upload_bytes: usize,
    pub rate_limit: RateLimitSettings,
}

/// Trims a looked-up value, treating an unset or blank one as absent.
fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parsed_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring unparsable environment value");
            default
        }),
        None => default,
    }
}

impl Config {
    /// Reads the process environment. `.env` loading is left to the binary.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| non_blank(lookup(key));

        let google = GoogleSecrets {
            client_id: var("GOOGLE_CLIENT_ID"),
            client_secret: var("GOOGLE_CLIENT_SECRET"),
            refresh_token: var("GOOGLE_REFRESH_TOKEN"),
        };

        let endpoints = GoogleEndpoints {
            auth_url: var("GOOGLE_OAUTH_AUTH_URL").unwrap_or_else(|| GOOGLE_AUTH_URL.to_string()),
            token_url: var("GOOGLE_OAUTH_TOKEN_URL")
                .unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
            upload_url: var("YOUTUBE_UPLOAD_URL")
                .unwrap_or_else(|| YOUTUBE_UPLOAD_URL.to_string()),
        };

        let base_url = var("PUBLIC_BASE_URL")
            .or_else(|| var("NEXT_PUBLIC_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let upload_redirect_uri = var("GOOGLE_UPLOAD_REDIRECT_URI")
            .unwrap_or_else(|| DEFAULT_UPLOAD_REDIRECT_URI.to_string());

        let default_addr = SocketAddr::from(([127, 0, 0, 1], 3000));

        Config {
            google,
            endpoints,
            base_url: base_url.trim_end_matches('/').to_string(),
            upload_redirect_uri,
            bind_addr: parsed_or("BIND_ADDR", var("BIND_ADDR"), default_addr),
            frontend_origin: var("FRONTEND_ORIGIN"),
            max_upload_bytes: parsed_or(
                "MAX_UPLOAD_BYTES",
                var("MAX_UPLOAD_BYTES"),
                DEFAULT_MAX_UPLOAD_BYTES,
            ),
            rate_limit: RateLimitSettings {
                auth_per_second: parsed_or(
                    "RATE_LIMITER_AUTH_SECONDS",
                    var("RATE_LIMITER_AUTH_SECONDS"),
                    1,
                ),
                auth_burst: parsed_or("RATE_LIMITER_AUTH_BURST", var("RATE_LIMITER_AUTH_BURST"), 10),
            },
        }
    }

    /// Redirect URI registered for the consent flow.
    pub fn callback_url(&self) -> String {
        format!("{}{}", self.base_url, CALLBACK_PATH)
    }

    /// Credentials for the consent flow and code exchange.
    pub fn oauth_credentials(&self) -> Result<OAuthCredentials, ApiError> {
        match (&self.google.client_id, &self.google.client_secret) {
            (Some(client_id), Some(client_secret)) => Ok(OAuthCredentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                redirect_uri: self.callback_url(),
            }),
            _ => Err(ApiError::Configuration(OAUTH_NOT_CONFIGURED.to_string())),
        }
    }

    /// Credentials for the upload path. All three secrets must be present.
    pub fn upload_credentials(&self) -> Result<UploadCredentials, ApiError> {
        match (
            &self.google.client_id,
            &self.google.client_secret,
            &self.google.refresh_token,
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => {
                Ok(UploadCredentials {
                    oauth: OAuthCredentials {
                        client_id: client_id.clone(),
                        client_secret: client_secret.clone(),
                        redirect_uri: self.upload_redirect_uri.clone(),
                    },
                    refresh_token: refresh_token.clone(),
                })
            }
            _ => Err(ApiError::Configuration(UPLOAD_NOT_CONFIGURED.to_string())),
        }
    }
}
