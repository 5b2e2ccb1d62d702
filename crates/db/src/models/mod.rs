//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and, where rows are inserted, a create DTO.

pub mod provider;
pub mod takeone_user;
pub mod video_container;
