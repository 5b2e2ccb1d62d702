//! Keeps [`ProfileVideoContainer`] rows in step with TakeOne.
//!
//! TakeOne is the source of truth for a container's stream. Both entry
//! points take a full container snapshot and overwrite (or clear) the local
//! stream triple from it. Replaying the same snapshot is a no-op.

use std::sync::Arc;

use musicspace_core::error::CoreError;
use musicspace_core::video::StreamTriple;
use musicspace_db::models::video_container::ProfileVideoContainer;
use musicspace_takeone::models::VideoContainer;
use musicspace_takeone::webhook::WebhookEvent;
use musicspace_takeone::TakeOneService;

use crate::error::AppResult;
use crate::takeone::store::VideoStore;

pub struct VideoContainerSync {
    store: Arc<dyn VideoStore>,
    takeone: Arc<dyn TakeOneService>,
}

impl VideoContainerSync {
    pub fn new(store: Arc<dyn VideoStore>, takeone: Arc<dyn TakeOneService>) -> Self {
        Self { store, takeone }
    }

    /// Apply the container snapshot carried by a webhook.
    ///
    /// Fails with [`CoreError::NotFound`] when the container is not ours.
    pub async fn apply_webhook(&self, event: &WebhookEvent) -> AppResult<ProfileVideoContainer> {
        tracing::debug!(
            event_type = ?event.event_type,
            project_id = %event.project.id,
            container_id = %event.video_container.id,
            "Applying TakeOne webhook",
        );
        self.apply_snapshot(&event.video_container).await
    }

    /// Fetch the current snapshot from TakeOne and apply it.
    pub async fn refresh(&self, container_id: &str) -> AppResult<ProfileVideoContainer> {
        if self.store.find_container(container_id).await?.is_none() {
            return Err(CoreError::not_found("ProfileVideoContainer", container_id).into());
        }
        let snapshot = self.takeone.get_video_container(container_id).await?;
        self.apply_snapshot(&snapshot).await
    }

    async fn apply_snapshot(&self, snapshot: &VideoContainer) -> AppResult<ProfileVideoContainer> {
        let triple = StreamTriple::from_snapshot(snapshot.video_stream.as_ref());

        let before = self
            .store
            .find_container(&snapshot.id)
            .await?
            .ok_or_else(|| CoreError::not_found("ProfileVideoContainer", &snapshot.id))?;

        if before.stream_triple() == triple {
            tracing::debug!(container_id = %snapshot.id, "Video stream unchanged");
            return Ok(before);
        }

        let after = self
            .store
            .update_container_stream(&snapshot.id, &triple)
            .await?
            .ok_or_else(|| CoreError::not_found("ProfileVideoContainer", &snapshot.id))?;

        tracing::info!(
            container_id = %after.id,
            has_stream = triple.is_populated(),
            format = %triple.format,
            "Video stream updated",
        );
        Ok(after)
    }
}
