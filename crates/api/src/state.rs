use std::sync::Arc;

use musicspace_events::InvitationMailer;
use musicspace_takeone::TakeOneService;

use crate::config::ServerConfig;
use crate::takeone::{ProviderOnboarding, VideoContainerSync, VideoStore};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Provider, TakeOne user and container persistence.
    pub store: Arc<dyn VideoStore>,
    /// TakeOne partner API client.
    pub takeone: Arc<dyn TakeOneService>,
    /// Invitation delivery (SMTP, or log-only when SMTP is not configured).
    pub mailer: Arc<dyn InvitationMailer>,
}

impl AppState {
    pub fn sync(&self) -> VideoContainerSync {
        VideoContainerSync::new(Arc::clone(&self.store), Arc::clone(&self.takeone))
    }

    pub fn onboarding(&self) -> ProviderOnboarding {
        ProviderOnboarding::new(
            Arc::clone(&self.store),
            Arc::clone(&self.takeone),
            Arc::clone(&self.mailer),
            self.config.video_container_template_id.clone(),
        )
    }
}
