use crate::config::Config;
use crate::services::oauth::google::service::GoogleOAuthService;
use crate::services::youtube::service::YouTubeService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub google_oauth: Arc<dyn GoogleOAuthService>,
    pub youtube: Arc<dyn YouTubeService>,
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::config::{
        GoogleEndpoints, GoogleSecrets, RateLimitSettings, DEFAULT_BASE_URL,
        DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_UPLOAD_REDIRECT_URI,
    };
    use std::net::SocketAddr;

    pub fn test_config() -> Config {
        Config {
            google: GoogleSecrets {
                client_id: Some("client-id".into()),
                client_secret: Some("client-secret".into()),
                refresh_token: Some("refresh-token".into()),
            },
            endpoints: GoogleEndpoints::default(),
            base_url: DEFAULT_BASE_URL.into(),
            upload_redirect_uri: DEFAULT_UPLOAD_REDIRECT_URI.into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            frontend_origin: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            rate_limit: RateLimitSettings {
                auth_per_second: 1,
                auth_burst: 10,
            },
        }
    }

    pub fn unconfigured_config() -> Config {
        Config {
            google: GoogleSecrets::default(),
            ..test_config()
        }
    }

    pub fn test_state(
        config: Config,
        google_oauth: Arc<dyn GoogleOAuthService>,
        youtube: Arc<dyn YouTubeService>,
    ) -> AppState {
        AppState {
            config: Arc::new(config),
            google_oauth,
            youtube,
        }
    }
}
