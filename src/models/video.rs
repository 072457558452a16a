use axum::body::Bytes;

pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";
/// YouTube category "People & Blogs".
pub const DEFAULT_CATEGORY_ID: &str = "22";
pub const DEFAULT_TAGS: &[&str] = &["shorts", "short video"];
pub const DEFAULT_MEDIA_TYPE: &str = "video/*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyStatus {
    Private,
    Unlisted,
    Public,
}

impl PrivacyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyStatus::Private => "private",
            PrivacyStatus::Unlisted => "unlisted",
            PrivacyStatus::Public => "public",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub tags: Vec<String>,
    pub privacy_status: PrivacyStatus,
    pub made_for_kids: bool,
}

impl VideoMetadata {
    /// Metadata for an uploaded short. New uploads always start private.
    pub fn private_short(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description: description.unwrap_or_default(),
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            privacy_status: PrivacyStatus::Private,
            made_for_kids: false,
        }
    }
}

/// The buffered `video` part of an upload request.
#[derive(Debug, Clone)]
pub struct VideoMedia {
    pub bytes: Bytes,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl VideoMedia {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub video: VideoMedia,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedVideo {
    pub id: String,
}

impl CreatedVideo {
    pub fn watch_url(&self) -> String {
        watch_url(&self.id)
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_BASE}{video_id}")
}
