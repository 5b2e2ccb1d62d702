//! A provider's identity on the TakeOne platform.

use musicspace_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `takeone_users` table. One per provider at most.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TakeOneUser {
    pub id: DbId,
    pub provider_id: DbId,
    /// Opaque id assigned by TakeOne. Never changes once stored.
    pub takeone_id: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a newly created TakeOne user.
#[derive(Debug, Clone)]
pub struct CreateTakeOneUser {
    pub provider_id: DbId,
    pub takeone_id: String,
}
