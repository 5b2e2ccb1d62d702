//! Outbound notifications for the Musicspace platform.
//!
//! - [`invitation`]: the provider video invitation and the
//!   [`InvitationMailer`] seam the onboarding workflow sends through.
//! - [`delivery`]: concrete delivery channels (SMTP email).

pub mod delivery;
pub mod invitation;

pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use invitation::{Invitation, InvitationMailer, LogOnlyMailer};
