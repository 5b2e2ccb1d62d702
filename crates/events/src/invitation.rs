//! The invitation a provider receives after requesting a profile video.
//!
//! It carries the one-time TakeOne authorization code the provider uses to
//! sign in to the recording app.

use async_trait::async_trait;

use crate::delivery::email::{EmailDelivery, EmailError};

const SUBJECT: &str = "Record your Musicspace profile video";

/// Everything needed to invite one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub to_email: String,
    pub display_name: String,
    pub authorization_code: String,
}

impl Invitation {
    pub fn subject(&self) -> &'static str {
        SUBJECT
    }

    /// Plain-text body.
    pub fn body(&self) -> String {
        format!(
            "Hi {name},\n\n\
             Your Musicspace profile video is ready to record.\n\
             Open the TakeOne app and sign in with this one-time code:\n\n\
             {code}\n\n\
             The code can only be used once.\n",
            name = self.display_name,
            code = self.authorization_code,
        )
    }
}

/// Sends provider invitations. Injected into the onboarding workflow.
#[async_trait]
pub trait InvitationMailer: Send + Sync {
    async fn send_invitation(&self, invitation: &Invitation) -> Result<(), EmailError>;
}

#[async_trait]
impl InvitationMailer for EmailDelivery {
    async fn send_invitation(&self, invitation: &Invitation) -> Result<(), EmailError> {
        self.send_plain(&invitation.to_email, invitation.subject(), invitation.body())
            .await
    }
}

/// Used when SMTP is not configured: only the recipient is logged. The
/// authorization code is a credential and never reaches the log.
pub struct LogOnlyMailer;

#[async_trait]
impl InvitationMailer for LogOnlyMailer {
    async fn send_invitation(&self, invitation: &Invitation) -> Result<(), EmailError> {
        tracing::warn!(
            to = %invitation.to_email,
            "SMTP not configured, invitation not emailed",
        );
        Ok(())
    }
}
