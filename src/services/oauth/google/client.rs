use crate::config::GoogleEndpoints;
use crate::models::oauth::{OAuthCredentials, TokenPair};
use crate::services::oauth::google::{errors::GoogleAuthError, service::GoogleOAuthService};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use tracing::warn;

#[derive(Clone)]
pub struct GoogleOAuthClient {
    pub client: Client,
    pub auth_url: String,
    pub token_url: String,
}

impl GoogleOAuthClient {
    pub fn new(client: Client, endpoints: &GoogleEndpoints) -> Self {
        Self {
            client,
            auth_url: endpoints.auth_url.clone(),
            token_url: endpoints.token_url.clone(),
        }
    }

    async fn post_token_form(&self, form: &[(&str, &str)]) -> Result<Response, GoogleAuthError> {
        let res = self.client.post(&self.token_url).form(form).send().await?;

        if res.status().is_success() {
            return Ok(res);
        }

        #[derive(Deserialize)]
        struct TokenErrorResponse {
            error: Option<String>,
            error_description: Option<String>,
        }

        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<TokenErrorResponse>(&body).ok();
        let (error, description) = match parsed {
            Some(TokenErrorResponse {
                error: Some(error),
                error_description,
            }) => (error, error_description),
            _ => (format!("HTTP {}", status), None),
        };

        warn!(status, error = %error, "google token endpoint rejected request");
        Err(GoogleAuthError::TokenRejected {
            status,
            error,
            description,
        })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[async_trait]
impl GoogleOAuthService for GoogleOAuthClient {
    fn authorization_url(
        &self,
        credentials: &OAuthCredentials,
        scopes: &[&str],
    ) -> Result<Url, GoogleAuthError> {
        let mut url = Url::parse(&self.auth_url)
            .map_err(|_| GoogleAuthError::InvalidAuthUrl(self.auth_url.clone()))?;

        url.query_pairs_mut()
            .append_pair("client_id", &credentials.client_id)
            .append_pair("redirect_uri", &credentials.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &scopes.join(" "))
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent");

        Ok(url)
    }

    async fn exchange_code(
        &self,
        credentials: &OAuthCredentials,
        code: &str,
    ) -> Result<TokenPair, GoogleAuthError> {
        let res = self
            .post_token_form(&[
                ("code", code),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("redirect_uri", credentials.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .await?;

        let token: TokenResponse = res
            .json()
            .await
            .map_err(|_| GoogleAuthError::InvalidTokenJson)?;

        let access_token = token.access_token.ok_or(GoogleAuthError::InvalidTokenJson)?;
        let refresh_token = token
            .refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(GoogleAuthError::MissingRefreshToken)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh_access_token(
        &self,
        credentials: &OAuthCredentials,
        refresh_token: &str,
    ) -> Result<String, GoogleAuthError> {
        let res = self
            .post_token_form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .await?;

        let token: TokenResponse = res
            .json()
            .await
            .map_err(|_| GoogleAuthError::InvalidTokenJson)?;

        token.access_token.ok_or(GoogleAuthError::InvalidTokenJson)
    }
}
