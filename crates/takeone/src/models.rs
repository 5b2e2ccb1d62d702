//! Wire types for the TakeOne partner API.
//!
//! Request types skip `None` fields when serialized. Response types have
//! no defaults for required fields, so a response missing one fails the
//! call instead of producing a half-filled record.

use musicspace_core::types::Timestamp;
use musicspace_core::video::VideoStream;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// App users
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/app_users`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    /// Our provider id; TakeOne enforces uniqueness per organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// An app user as returned by TakeOne.
#[derive(Debug, Clone, Deserialize)]
pub struct AppUser {
    pub id: String,
    pub external_id: Option<String>,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
}

/// Body of `POST /api/v1/app_users/authorize`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationCodeRequest {
    pub user: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationCodeResponse {
    pub code: String,
}

// ---------------------------------------------------------------------------
// Video containers
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/video_containers`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateVideoContainerRequest {
    pub template: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A hosted video container, as returned by the API and embedded in
/// webhook notifications.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VideoContainer {
    pub id: String,
    pub hotlinking_protection_enabled: bool,
    pub allowed_origins: Vec<String>,
    /// Absent until TakeOne has published a playable stream.
    pub video_stream: Option<VideoStream>,
    pub created_date_time: Timestamp,
    pub modified_date_time: Timestamp,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/projects`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest {
    pub user: String,
    pub video_container: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_display_name: Option<String>,
}

/// A project pairs an app user with a video container.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub id: String,
    pub user: String,
    pub video_container: String,
    pub display_name: Option<String>,
    pub state: String,
    pub publishing_status: String,
    pub created_date_time: Timestamp,
    pub modified_date_time: Timestamp,
}

impl Project {
    pub fn is_published(&self) -> bool {
        self.publishing_status == "published"
    }
}
