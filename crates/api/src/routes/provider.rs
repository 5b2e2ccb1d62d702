use axum::routing::{get, post};
use axum::Router;

use crate::handlers::provider_video;
use crate::state::AppState;

/// Routes mounted at `/api/v1/providers`.
///
/// ```text
/// POST   /{id}/takeone-user      create_takeone_user
/// GET    /{id}/video             get_video
/// POST   /{id}/video             add_video
/// POST   /{id}/video/refresh     refresh_video
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/takeone-user",
            post(provider_video::create_takeone_user),
        )
        .route(
            "/{id}/video",
            get(provider_video::get_video).post(provider_video::add_video),
        )
        .route("/{id}/video/refresh", post(provider_video::refresh_video))
}
