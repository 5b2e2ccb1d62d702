use async_trait::async_trait;
use musicspace_core::types::DbId;
use musicspace_core::video::StreamTriple;
use musicspace_db::models::provider::Provider;
use musicspace_db::models::takeone_user::{CreateTakeOneUser, TakeOneUser};
use musicspace_db::models::video_container::{CreateVideoContainer, ProfileVideoContainer};
use musicspace_db::repositories::{ProviderRepo, TakeOneUserRepo, VideoContainerRepo};
use musicspace_db::DbPool;

use crate::error::AppResult;

/// Persistence used by the TakeOne services.
///
/// Lookups of the optional one-to-one relations return `Option`.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn find_provider(&self, id: DbId) -> AppResult<Option<Provider>>;

    async fn find_takeone_user(&self, provider_id: DbId) -> AppResult<Option<TakeOneUser>>;

    async fn create_takeone_user(&self, input: &CreateTakeOneUser) -> AppResult<TakeOneUser>;

    async fn find_container(&self, id: &str) -> AppResult<Option<ProfileVideoContainer>>;

    async fn find_container_for_user(
        &self,
        takeone_user_id: DbId,
    ) -> AppResult<Option<ProfileVideoContainer>>;

    async fn create_container(
        &self,
        input: &CreateVideoContainer,
    ) -> AppResult<ProfileVideoContainer>;

    /// Store a new stream triple. Must not touch the row when the triple is
    /// unchanged. `None` when the container does not exist.
    async fn update_container_stream(
        &self,
        id: &str,
        triple: &StreamTriple,
    ) -> AppResult<Option<ProfileVideoContainer>>;
}

/// [`VideoStore`] backed by the Postgres repositories.
#[derive(Clone)]
pub struct PgVideoStore {
    pool: DbPool,
}

impl PgVideoStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn find_provider(&self, id: DbId) -> AppResult<Option<Provider>> {
        Ok(ProviderRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_takeone_user(&self, provider_id: DbId) -> AppResult<Option<TakeOneUser>> {
        Ok(TakeOneUserRepo::find_by_provider(&self.pool, provider_id).await?)
    }

    async fn create_takeone_user(&self, input: &CreateTakeOneUser) -> AppResult<TakeOneUser> {
        Ok(TakeOneUserRepo::create(&self.pool, input).await?)
    }

    async fn find_container(&self, id: &str) -> AppResult<Option<ProfileVideoContainer>> {
        Ok(VideoContainerRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_container_for_user(
        &self,
        takeone_user_id: DbId,
    ) -> AppResult<Option<ProfileVideoContainer>> {
        Ok(VideoContainerRepo::find_by_takeone_user(&self.pool, takeone_user_id).await?)
    }

    async fn create_container(
        &self,
        input: &CreateVideoContainer,
    ) -> AppResult<ProfileVideoContainer> {
        Ok(VideoContainerRepo::create(&self.pool, input).await?)
    }

    async fn update_container_stream(
        &self,
        id: &str,
        triple: &StreamTriple,
    ) -> AppResult<Option<ProfileVideoContainer>> {
        Ok(VideoContainerRepo::update_stream(&self.pool, id, triple).await?)
    }
}
