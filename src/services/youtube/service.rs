use async_trait::async_trait;

use crate::models::oauth::UploadCredentials;
use crate::models::video::{CreatedVideo, VideoMedia, VideoMetadata};
use crate::services::youtube::errors::YouTubeError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait YouTubeService: Send + Sync {
    /// Authenticates with the refresh token in `credentials` and publishes
    /// `media` as a new video. Every call creates a new video.
    async fn create_video(
        &self,
        credentials: &UploadCredentials,
        metadata: &VideoMetadata,
        media: VideoMedia,
    ) -> Result<CreatedVideo, YouTubeError>;
}
