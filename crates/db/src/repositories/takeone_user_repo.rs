//! Repository for the `takeone_users` table.

use musicspace_core::types::DbId;
use sqlx::PgPool;

use crate::models::takeone_user::{CreateTakeOneUser, TakeOneUser};

const COLUMNS: &str = "id, provider_id, takeone_id, is_active, created_at, updated_at";

/// Provides persistence for TakeOne users.
pub struct TakeOneUserRepo;

impl TakeOneUserRepo {
    /// Insert a new TakeOne user, returning the created row.
    ///
    /// Fails with a unique violation on `uq_takeone_users_provider_id` if the
    /// provider already has one.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTakeOneUser,
    ) -> Result<TakeOneUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO takeone_users (provider_id, takeone_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TakeOneUser>(&query)
            .bind(input.provider_id)
            .bind(&input.takeone_id)
            .fetch_one(pool)
            .await
    }

    /// Find the TakeOne user owned by a provider, if any.
    pub async fn find_by_provider(
        pool: &PgPool,
        provider_id: DbId,
    ) -> Result<Option<TakeOneUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM takeone_users WHERE provider_id = $1");
        sqlx::query_as::<_, TakeOneUser>(&query)
            .bind(provider_id)
            .fetch_optional(pool)
            .await
    }
}
