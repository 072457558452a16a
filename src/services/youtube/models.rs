//! Wire types for the YouTube Data API v3 `videos.insert` call.

use serde::{Deserialize, Serialize};

use crate::models::video::VideoMetadata;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub privacy_status: String,
    pub self_declared_made_for_kids: bool,
}

#[derive(Debug, Serialize)]
pub struct VideoResource {
    pub snippet: VideoSnippet,
    pub status: VideoStatus,
}

impl From<&VideoMetadata> for VideoResource {
    fn from(meta: &VideoMetadata) -> Self {
        Self {
            snippet: VideoSnippet {
                title: meta.title.clone(),
                description: meta.description.clone(),
                category_id: meta.category_id.clone(),
                tags: meta.tags.clone(),
            },
            status: VideoStatus {
                privacy_status: meta.privacy_status.as_str().to_string(),
                self_declared_made_for_kids: meta.made_for_kids,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InsertedVideo {
    pub id: String,
}

/// Google's standard JSON error envelope.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_serializes_with_api_field_names() {
        let meta = VideoMetadata::private_short("Clip", Some("desc".into()));
        let value = serde_json::to_value(VideoResource::from(&meta)).unwrap();

        assert_eq!(
            value,
            json!({
                "snippet": {
                    "title": "Clip",
                    "description": "desc",
                    "categoryId": "22",
                    "tags": ["shorts", "short video"]
                },
                "status": {
                    "privacyStatus": "private",
                    "selfDeclaredMadeForKids": false
                }
            })
        );
    }
}
