//! Handler for inbound TakeOne notifications.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;

use crate::state::AppState;
use crate::takeone::webhook;

/// POST /api/v1/takeone/webhook
///
/// Always answers 200, whatever the body. A body that is not JSON at all is
/// logged and dropped; everything else goes through [`webhook::dispatch`].
pub async fn receive(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, bytes = body.len(), "TakeOne webhook body is not JSON");
            return StatusCode::OK;
        }
    };

    let outcome = webhook::dispatch(&state.sync(), &payload).await;
    tracing::debug!(?outcome, "TakeOne webhook handled");
    StatusCode::OK
}
