//! Repository for the `providers` table.

use musicspace_core::types::DbId;
use sqlx::PgPool;

use crate::models::provider::Provider;

const COLUMNS: &str = "id, full_name, email, created_at, updated_at";

/// Read access to providers.
pub struct ProviderRepo;

impl ProviderRepo {
    /// Find a provider by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE id = $1");
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
