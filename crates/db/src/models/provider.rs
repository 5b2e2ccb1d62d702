//! Provider (music instructor) entity, read-only from this crate's point of view.

use musicspace_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `providers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Provider {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
