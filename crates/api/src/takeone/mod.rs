//! TakeOne integration services.
//!
//! - [`store`]: the persistence seam ([`VideoStore`]) and its Postgres
//!   implementation.
//! - [`sync`]: keeps local container records in step with TakeOne
//!   snapshots, from webhooks or on-demand refresh.
//! - [`onboarding`]: provisions a provider's TakeOne user, container and
//!   project, then invites them.
//! - [`webhook`]: decodes inbound notifications and hands them to sync.

pub mod onboarding;
pub mod store;
pub mod sync;
pub mod webhook;

pub use onboarding::ProviderOnboarding;
pub use store::{PgVideoStore, VideoStore};
pub use sync::VideoContainerSync;
