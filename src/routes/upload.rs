use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::video::{UploadRequest, VideoMedia, VideoMetadata, DEFAULT_MEDIA_TYPE};
use crate::routes::errors::ApiError;
use crate::state::AppState;

pub const UPLOADED_MESSAGE: &str = "Video uploaded successfully!";

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedResponse {
    pub success: bool,
    pub video_id: String,
    pub video_url: String,
    pub message: String,
}

#[derive(Default)]
struct UploadForm {
    video: Option<VideoMedia>,
    title: Option<String>,
    description: Option<String>,
}

impl UploadForm {
    fn into_request(self) -> Result<UploadRequest, ApiError> {
        let video = self
            .video
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::Validation("No video file provided".to_string()))?;

        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Validation("Title is required".to_string()))?;

        Ok(UploadRequest {
            video,
            title,
            description: self.description.filter(|d| !d.is_empty()),
        })
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status().is_client_error() {
        ApiError::Validation(format!("Invalid upload body: {}", err.body_text()))
    } else {
        ApiError::Internal(anyhow::anyhow!(err.body_text()))
    }
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "video" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .filter(|ct| !ct.is_empty())
                    .unwrap_or(DEFAULT_MEDIA_TYPE)
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.video = Some(VideoMedia {
                    bytes,
                    content_type,
                    file_name,
                });
            }
            "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
            "description" => {
                form.description = Some(field.text().await.map_err(multipart_error)?)
            }
            // Unknown parts are drained and ignored.
            _ => {}
        }
    }

    Ok(form)
}

/// Accepts `video`, `title` and `description` and publishes the video as a
/// private upload on the configured channel.
pub async fn upload_video(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = multipart.map_err(|rejection| {
        ApiError::Validation(format!("Invalid upload body: {}", rejection.body_text()))
    })?;

    let request = read_upload_form(multipart).await?.into_request()?;
    let credentials = state.config.upload_credentials()?;

    info!(
        title = %request.title,
        bytes = request.video.len(),
        file_name = ?request.video.file_name,
        "uploading video"
    );

    let metadata = VideoMetadata::private_short(request.title, request.description);
    let video = state
        .youtube
        .create_video(&credentials, &metadata, request.video)
        .await
        .map_err(ApiError::Upload)?;

    Ok(Json(UploadedResponse {
        success: true,
        video_url: video.watch_url(),
        video_id: video.id,
        message: UPLOADED_MESSAGE.to_string(),
    })
    .into_response())
}
