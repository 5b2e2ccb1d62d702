//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod provider_repo;
pub mod takeone_user_repo;
pub mod video_container_repo;

pub use provider_repo::ProviderRepo;
pub use takeone_user_repo::TakeOneUserRepo;
pub use video_container_repo::VideoContainerRepo;
