use thiserror::Error;

use crate::services::oauth::google::errors::GoogleAuthError;

#[derive(Error, Debug)]
pub enum YouTubeError {
    #[error("{0}")]
    Authentication(#[from] GoogleAuthError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("YouTube did not return a resumable upload session")]
    MissingUploadSession,
    #[error("invalid YouTube response: {0}")]
    InvalidResponse(String),
}

impl YouTubeError {
    /// Whether the failure points at the stored client id, secret or refresh
    /// token rather than at the request or the service. The message match is
    /// case-sensitive.
    pub fn is_credential_failure(&self) -> bool {
        match self {
            YouTubeError::Authentication(err) if err.is_credential_rejection() => true,
            YouTubeError::Rejected { status: 401, .. } => true,
            other => other.to_string().contains("credentials"),
        }
    }
}
