//! Provider onboarding: provisions everything a provider needs to record a
//! profile video on TakeOne and sends them the sign-in code.
//!
//! Steps run strictly in order and the first failure aborts the rest.
//! Nothing already created remotely or locally is rolled back.

use std::sync::Arc;

use musicspace_core::error::CoreError;
use musicspace_db::models::provider::Provider;
use musicspace_db::models::takeone_user::{CreateTakeOneUser, TakeOneUser};
use musicspace_db::models::video_container::{CreateVideoContainer, ProfileVideoContainer};
use musicspace_events::{Invitation, InvitationMailer};
use musicspace_takeone::models::{
    CreateProjectRequest, CreateUserRequest, CreateVideoContainerRequest,
};
use musicspace_takeone::TakeOneService;

use crate::error::AppResult;
use crate::takeone::store::VideoStore;

/// Partner API calls `add_video` can make on one request: user, container,
/// project and authorization code.
pub const MAX_TAKEONE_CALLS: u32 = 4;

pub struct ProviderOnboarding {
    store: Arc<dyn VideoStore>,
    takeone: Arc<dyn TakeOneService>,
    mailer: Arc<dyn InvitationMailer>,
    template_id: String,
}

impl ProviderOnboarding {
    pub fn new(
        store: Arc<dyn VideoStore>,
        takeone: Arc<dyn TakeOneService>,
        mailer: Arc<dyn InvitationMailer>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            takeone,
            mailer,
            template_id: template_id.into(),
        }
    }

    /// Register the provider as a TakeOne app user.
    ///
    /// A provider has at most one; a second attempt fails with
    /// [`CoreError::Conflict`] before anything is sent to TakeOne.
    pub async fn create_external_user(&self, provider: &Provider) -> AppResult<TakeOneUser> {
        if self.store.find_takeone_user(provider.id).await?.is_some() {
            return Err(CoreError::Conflict(format!(
                "Provider {} already has a TakeOne user",
                provider.id
            ))
            .into());
        }
        self.register_user(provider).await
    }

    /// Set up a profile video for the provider and invite them to record it.
    ///
    /// 1. Reuse the provider's TakeOne user, registering one if absent.
    /// 2. Create the video container from the configured template and
    ///    record it locally. A provider with a container already is a
    ///    [`CoreError::Conflict`].
    /// 3. Open a TakeOne project for the user and container.
    /// 4. Issue an authorization code and email it to the provider.
    pub async fn add_video(&self, provider: &Provider) -> AppResult<ProfileVideoContainer> {
        let user = match self.store.find_takeone_user(provider.id).await? {
            Some(user) => user,
            None => self.register_user(provider).await?,
        };

        if self.store.find_container_for_user(user.id).await?.is_some() {
            return Err(CoreError::Conflict(format!(
                "Provider {} already has a profile video container",
                provider.id
            ))
            .into());
        }

        let remote = self
            .takeone
            .create_video_container(&CreateVideoContainerRequest {
                template: self.template_id.clone(),
                name: container_name(provider),
                description: None,
            })
            .await?;

        let container = self
            .store
            .create_container(&CreateVideoContainer {
                id: remote.id,
                template_id: self.template_id.clone(),
                takeone_user_id: user.id,
            })
            .await?;
        tracing::info!(
            provider_id = provider.id,
            container_id = %container.id,
            "Profile video container created",
        );

        let project = self
            .takeone
            .create_project(&CreateProjectRequest {
                user: user.takeone_id.clone(),
                video_container: container.id.clone(),
                organization_display_name: None,
            })
            .await?;
        tracing::info!(
            provider_id = provider.id,
            project_id = %project.id,
            container_id = %container.id,
            state = %project.state,
            "TakeOne project created",
        );

        let code = self.takeone.authorize(&user.takeone_id).await?;
        self.mailer
            .send_invitation(&Invitation {
                to_email: provider.email.clone(),
                display_name: provider.full_name.clone(),
                authorization_code: code,
            })
            .await?;
        tracing::info!(provider_id = provider.id, "Profile video invitation sent");

        Ok(container)
    }

    async fn register_user(&self, provider: &Provider) -> AppResult<TakeOneUser> {
        let remote = self
            .takeone
            .create_user(&CreateUserRequest {
                external_id: Some(provider.id.to_string()),
                display_name: Some(provider.full_name.clone()),
                email_address: Some(provider.email.clone()),
            })
            .await?;

        let user = self
            .store
            .create_takeone_user(&CreateTakeOneUser {
                provider_id: provider.id,
                takeone_id: remote.id,
            })
            .await?;
        tracing::info!(
            provider_id = provider.id,
            takeone_user_id = %user.takeone_id,
            "TakeOne user registered",
        );
        Ok(user)
    }
}

fn container_name(provider: &Provider) -> String {
    format!("{}'s profile video", provider.full_name)
}
