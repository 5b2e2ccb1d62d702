//! Inbound TakeOne webhook notifications.

use musicspace_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::{Project, VideoContainer};

/// Notification kinds TakeOne delivers to the webhook endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    ProjectStatusChanged,
    ProjectPublished,
    ProjectUnpublished,
    ProjectPublishingError,
}

/// A decoded notification. Parsed, applied, then dropped.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,
    pub timestamp: Timestamp,
    pub project: Project,
    pub video_container: VideoContainer,
}
