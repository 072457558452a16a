use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::Url;

use super::{errors::GoogleAuthError, service::GoogleOAuthService};
use crate::models::oauth::{OAuthCredentials, TokenPair};

#[derive(Default)]
pub struct MockGoogleOAuth {
    pub access_token: String,
    pub refresh_token: String,
    /// Error text returned by `exchange_code` when set.
    pub exchange_error: Option<String>,
    pub exchange_calls: AtomicUsize,
}

impl MockGoogleOAuth {
    pub fn with_refresh_token(refresh_token: &str) -> Self {
        Self {
            access_token: "access".into(),
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            exchange_error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn exchange_count(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl GoogleOAuthService for MockGoogleOAuth {
    fn authorization_url(
        &self,
        credentials: &OAuthCredentials,
        scopes: &[&str],
    ) -> Result<Url, GoogleAuthError> {
        let mut url = Url::parse("https://accounts.example.test/auth").expect("static url");
        url.query_pairs_mut()
            .append_pair("client_id", &credentials.client_id)
            .append_pair("redirect_uri", &credentials.redirect_uri)
            .append_pair("scope", &scopes.join(" "));
        Ok(url)
    }

    async fn exchange_code(
        &self,
        _credentials: &OAuthCredentials,
        _code: &str,
    ) -> Result<TokenPair, GoogleAuthError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.exchange_error {
            return Err(GoogleAuthError::TokenRejected {
                status: 400,
                error: error.clone(),
                description: None,
            });
        }
        Ok(TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        })
    }

    async fn refresh_access_token(
        &self,
        _credentials: &OAuthCredentials,
        _refresh_token: &str,
    ) -> Result<String, GoogleAuthError> {
        Ok(self.access_token.clone())
    }
}
