//! Handlers for a provider's TakeOne profile video.
//!
//! Providers are managed elsewhere; these endpoints only look them up.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use musicspace_core::error::CoreError;
use musicspace_core::types::{DbId, Timestamp};
use musicspace_core::video::VideoStream;
use musicspace_db::models::provider::Provider;
use musicspace_db::models::video_container::ProfileVideoContainer;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// What a provider page needs to decide whether to embed the player.
#[derive(Debug, Serialize)]
pub struct ProfileVideoResponse {
    pub id: String,
    pub template_id: String,
    pub video_stream: Option<VideoStream>,
    pub should_render_video: bool,
    pub updated_at: Timestamp,
}

impl From<ProfileVideoContainer> for ProfileVideoResponse {
    fn from(container: ProfileVideoContainer) -> Self {
        Self {
            video_stream: container.video_stream(),
            should_render_video: container.should_render_video(),
            id: container.id,
            template_id: container.template_id,
            updated_at: container.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TakeOneUserResponse {
    pub takeone_id: String,
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn load_provider(state: &AppState, id: DbId) -> AppResult<Provider> {
    state
        .store
        .find_provider(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Provider", id).into())
}

async fn load_container(state: &AppState, provider_id: DbId) -> AppResult<ProfileVideoContainer> {
    let not_found = || CoreError::not_found("ProfileVideoContainer", format!("provider {provider_id}"));

    let user = state
        .store
        .find_takeone_user(provider_id)
        .await?
        .ok_or_else(not_found)?;
    let container = state
        .store
        .find_container_for_user(user.id)
        .await?
        .ok_or_else(not_found)?;
    Ok(container)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/providers/{id}/takeone-user
///
/// Register the provider with TakeOne. 409 if already registered.
pub async fn create_takeone_user(
    State(state): State<AppState>,
    Path(provider_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let provider = load_provider(&state, provider_id).await?;
    let user = state.onboarding().create_external_user(&provider).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TakeOneUserResponse {
                takeone_id: user.takeone_id,
                is_active: user.is_active,
            },
        }),
    ))
}

/// POST /api/v1/providers/{id}/video
///
/// Provision the profile video container and email the provider their
/// TakeOne sign-in code.
pub async fn add_video(
    State(state): State<AppState>,
    Path(provider_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let provider = load_provider(&state, provider_id).await?;
    let container = state.onboarding().add_video(&provider).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProfileVideoResponse::from(container),
        }),
    ))
}

/// GET /api/v1/providers/{id}/video
///
/// The locally stored container state.
pub async fn get_video(
    State(state): State<AppState>,
    Path(provider_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let container = load_container(&state, provider_id).await?;

    Ok(Json(DataResponse {
        data: ProfileVideoResponse::from(container),
    }))
}

/// POST /api/v1/providers/{id}/video/refresh
///
/// Pull the container from TakeOne and store its current stream.
pub async fn refresh_video(
    State(state): State<AppState>,
    Path(provider_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let container = load_container(&state, provider_id).await?;
    let refreshed = state.sync().refresh(&container.id).await?;

    Ok(Json(DataResponse {
        data: ProfileVideoResponse::from(refreshed),
    }))
}
