//! Results returned by the services.

use serde::Serialize;

use crate::entities::SanitizedUser;

/// Successful registration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegistrationOutcome {
    /// Email confirmation is required; no credential is issued yet.
    PendingConfirmation { user: SanitizedUser },
    Authenticated { jwt: String, user: SanitizedUser },
}

impl RegistrationOutcome {
    pub fn user(&self) -> &SanitizedUser {
        match self {
            RegistrationOutcome::PendingConfirmation { user } => user,
            RegistrationOutcome::Authenticated { user, .. } => user,
        }
    }

    pub fn jwt(&self) -> Option<&str> {
        match self {
            RegistrationOutcome::PendingConfirmation { .. } => None,
            RegistrationOutcome::Authenticated { jwt, .. } => Some(jwt),
        }
    }
}

/// A confirmed account and where to send the browser next
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationOutcome {
    pub user: SanitizedUser,
    pub redirect_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResendOutcome {
    pub email: String,
    pub sent: bool,
}
