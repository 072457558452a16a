use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use tracing::{error, info};

use crate::models::oauth::UploadCredentials;
use crate::models::video::{CreatedVideo, VideoMedia, VideoMetadata};
use crate::services::oauth::google::service::GoogleOAuthService;
use crate::services::youtube::{
    errors::YouTubeError,
    models::{ApiErrorEnvelope, InsertedVideo, VideoResource},
    service::YouTubeService,
};

/// Uploads through the resumable protocol in a single session: one POST
/// carrying the metadata, then one PUT carrying the whole buffered file.
#[derive(Clone)]
pub struct YouTubeClient {
    pub client: Client,
    pub oauth: Arc<dyn GoogleOAuthService>,
    pub upload_url: String,
}

impl YouTubeClient {
    pub fn new(client: Client, oauth: Arc<dyn GoogleOAuthService>, upload_url: &str) -> Self {
        Self {
            client,
            oauth,
            upload_url: upload_url.to_string(),
        }
    }

    async fn start_session(
        &self,
        access_token: &str,
        metadata: &VideoMetadata,
        media: &VideoMedia,
    ) -> Result<String, YouTubeError> {
        let res = self
            .client
            .post(&self.upload_url)
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .bearer_auth(access_token)
            .header("X-Upload-Content-Type", media.content_type.as_str())
            .header("X-Upload-Content-Length", media.len().to_string())
            .json(&VideoResource::from(metadata))
            .send()
            .await?;

        let res = ensure_success(res).await?;

        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .ok_or(YouTubeError::MissingUploadSession)
    }

    async fn send_media(
        &self,
        access_token: &str,
        session_url: &str,
        media: VideoMedia,
    ) -> Result<InsertedVideo, YouTubeError> {
        let res = self
            .client
            .put(session_url)
            .bearer_auth(access_token)
            .header(header::CONTENT_TYPE, media.content_type.as_str())
            .body(media.bytes)
            .send()
            .await?;

        ensure_success(res)
            .await?
            .json::<InsertedVideo>()
            .await
            .map_err(|e| YouTubeError::InvalidResponse(e.to_string()))
    }
}

/// Turns a non-2xx response into `YouTubeError::Rejected`, pulling the
/// message out of Google's error envelope when there is one.
async fn ensure_success(res: Response) -> Result<Response, YouTubeError> {
    if res.status().is_success() {
        return Ok(res);
    }

    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .ok()
        .and_then(|env| env.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("YouTube request failed with status {}", status.as_u16()));

    error!(status = status.as_u16(), message = %message, "youtube api rejected request");
    Err(YouTubeError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl YouTubeService for YouTubeClient {
    async fn create_video(
        &self,
        credentials: &UploadCredentials,
        metadata: &VideoMetadata,
        media: VideoMedia,
    ) -> Result<CreatedVideo, YouTubeError> {
        let access_token = self
            .oauth
            .refresh_access_token(&credentials.oauth, &credentials.refresh_token)
            .await?;

        let session_url = self.start_session(&access_token, metadata, &media).await?;
        let bytes = media.len();
        let inserted = self.send_media(&access_token, &session_url, media).await?;

        info!(video_id = %inserted.id, bytes, "video uploaded to youtube");
        Ok(CreatedVideo { id: inserted.id })
    }
}
