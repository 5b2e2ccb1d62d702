use axum::routing::post;
use axum::Router;

use crate::handlers::takeone_webhook;
use crate::state::AppState;

/// Routes mounted at `/api/v1/takeone`.
///
/// ```text
/// POST   /webhook      receive
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(takeone_webhook::receive))
}
