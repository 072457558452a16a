use std::fmt;

#[derive(Debug)]
pub enum GoogleAuthError {
    InvalidAuthUrl(String),
    TokenRequestFailed(String),
    TokenRejected {
        status: u16,
        error: String,
        description: Option<String>,
    },
    InvalidTokenJson,
    MissingRefreshToken,
}

impl GoogleAuthError {
    /// The provider looked at the client or grant and refused it.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, GoogleAuthError::TokenRejected { .. })
    }
}

impl fmt::Display for GoogleAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GoogleAuthError::*;
        match self {
            InvalidAuthUrl(url) => write!(f, "Invalid Google authorization URL: {}", url),
            TokenRequestFailed(err) => write!(f, "Google token request failed: {}", err),
            TokenRejected {
                status,
                error,
                description: Some(description),
            } => write!(
                f,
                "Google rejected the token request ({}): {}: {}",
                status, error, description
            ),
            TokenRejected {
                status,
                error,
                description: None,
            } => write!(f, "Google rejected the token request ({}): {}", status, error),
            InvalidTokenJson => write!(f, "Invalid token JSON"),
            MissingRefreshToken => write!(f, "refresh token missing in response"),
        }
    }
}

impl std::error::Error for GoogleAuthError {}

impl From<reqwest::Error> for GoogleAuthError {
    fn from(e: reqwest::Error) -> Self {
        GoogleAuthError::TokenRequestFailed(e.to_string())
    }
}
