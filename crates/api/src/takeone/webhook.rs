//! Inbound TakeOne notifications.
//!
//! TakeOne retries anything that is not a 2xx, so the endpoint acknowledges
//! every delivery. Bad payloads and sync failures are logged here and never
//! surface to the caller.

use musicspace_takeone::webhook::WebhookEvent;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::takeone::sync::VideoContainerSync;

/// What happened to one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The container snapshot was applied.
    Applied { container_id: String },
    /// The payload did not decode.
    Rejected,
    /// Decoded, but applying it failed.
    Failed,
}

/// Strictly decode a webhook payload.
///
/// Missing required fields or mistyped values are a
/// [`AppError::BadRequest`]. Extra fields are ignored.
pub fn decode(payload: &Value) -> AppResult<WebhookEvent> {
    WebhookEvent::deserialize(payload)
        .map_err(|e| AppError::BadRequest(format!("Malformed TakeOne webhook: {e}")))
}

/// Decode and apply a payload, swallowing any failure.
pub async fn dispatch(sync: &VideoContainerSync, payload: &Value) -> DispatchOutcome {
    let event = match decode(payload) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring TakeOne webhook");
            return DispatchOutcome::Rejected;
        }
    };

    match sync.apply_webhook(&event).await {
        Ok(container) => DispatchOutcome::Applied {
            container_id: container.id,
        },
        Err(e) => {
            tracing::error!(
                error = %e,
                container_id = %event.video_container.id,
                "Failed to apply TakeOne webhook",
            );
            DispatchOutcome::Failed
        }
    }
}
