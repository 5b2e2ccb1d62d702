//! Wire types for the SDK API.

use std::collections::BTreeMap;

use musicspace_core::video::VideoFormat;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Body of `POST /sdkapi/v1/token`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "grant_type", rename_all = "snake_case")]
pub enum TokenRequest {
    AuthorizationCode { code: String },
    RefreshToken { refresh_token: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Projects and segments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub script: Option<String>,
}

/// `GET /sdkapi/v1/projects`, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsPage {
    pub results: Vec<ProjectSummary>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVideoSegmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoSegment {
    pub id: String,
    pub script: Option<String>,
}

// ---------------------------------------------------------------------------
// Takes
// ---------------------------------------------------------------------------

/// Container format of an uploaded file item. Takes are always QuickTime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Mov,
}

/// Description of the video file behind a take.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TakeVideoFileItemProps {
    pub video_format: VideoFormat,
    /// Seconds, rounded up to one decimal place.
    pub video_length: f64,
    pub video_width: u32,
    pub video_height: u32,
    pub video_crf: u32,
    pub video_frame_count: u64,
    /// Rational frame rate as reported by ffprobe, e.g. `30000/1001`.
    pub video_frame_rate: String,
    pub file_format: FileFormat,
    pub file_object_content_length: u64,
    /// Base64 of the raw MD5 digest.
    pub file_object_content_md5: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTakeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub video_file_item: TakeVideoFileItemProps,
}

/// Target of a direct-to-storage multipart POST.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresignedPostRequest {
    pub url: String,
    /// Form fields that must precede the file in the multipart body.
    pub fields: BTreeMap<String, String>,
}

/// One byte range of a take's source file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoUploadRequestPart {
    pub state: String,
    pub part_offset: u64,
    pub content_offset: u64,
    pub content_length: u64,
    /// `None` when TakeOne already has this range.
    pub presigned_post_request: Option<PresignedPostRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoUploadRequest {
    pub state: String,
    pub parts: Vec<VideoUploadRequestPart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Take {
    pub id: String,
    pub video_upload_request: VideoUploadRequest,
    pub metadata: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Production requests and reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CreateProductionRequest {
    pub video_segments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,
    pub add_subtitles: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionRequestVideoRun {
    pub state: String,
    pub output_video_format: VideoFormat,
    pub editing_progress: f64,
    pub post_processing_progress: f64,
    pub streaming_url: Option<String>,
}

/// A render job over all segments of a project.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductionRequest {
    pub id: String,
    pub state: String,
    pub coloring_progress: f64,
    pub editing_progress: f64,
    pub post_processing_progress: f64,
    pub project: String,
    pub video_runs: Vec<ProductionRequestVideoRun>,
}

impl ProductionRequest {
    pub const STATE_COMPLETED: &'static str = "completed";
    pub const STATE_ERROR: &'static str = "error";

    /// Polling stops once the request has completed or failed.
    pub fn is_terminal(&self) -> bool {
        self.state == Self::STATE_COMPLETED || self.state == Self::STATE_ERROR
    }

    pub fn is_completed(&self) -> bool {
        self.state == Self::STATE_COMPLETED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewResult {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserReview {
    pub result: ReviewResult,
    pub production_request: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserReview {
    pub id: String,
    pub result: ReviewResult,
    pub project: String,
    pub production_request: String,
    pub reviewer: String,
}
