//! Redeeming and re-sending email confirmation links.

use std::sync::Arc;

use tracing::info;

use super::notifier::ConfirmationNotifier;
use crate::entities::SanitizedUser;
use crate::repositories::{SettingsProvider, UserStore};
use crate::types::{
    normalize_email, ConfirmationOutcome, RegistrationError, RegistrationResult, ResendOutcome,
};

const DEFAULT_REDIRECT: &str = "/";

pub struct ConfirmationService {
    settings: Arc<dyn SettingsProvider>,
    users: Arc<dyn UserStore>,
    notifier: Arc<dyn ConfirmationNotifier>,
}

impl ConfirmationService {
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        users: Arc<dyn UserStore>,
        notifier: Arc<dyn ConfirmationNotifier>,
    ) -> Self {
        Self {
            settings,
            users,
            notifier,
        }
    }

    /// Confirm the account holding `token`. A token is single use.
    pub async fn confirm(&self, token: &str) -> RegistrationResult<ConfirmationOutcome> {
        let token = token.trim();
        if token.is_empty() {
            return Err(RegistrationError::InvalidConfirmationToken);
        }

        let pending = self
            .users
            .find_by_confirmation_token(token)
            .await?
            .ok_or(RegistrationError::InvalidConfirmationToken)?;

        let confirmed = self.users.mark_confirmed(pending.id).await?;
        info!(user_id = confirmed.id, "email confirmed");

        let redirect_to = self
            .settings
            .registration_settings()
            .await?
            .email_confirmation_redirection
            .filter(|target| !target.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REDIRECT.to_string());

        Ok(ConfirmationOutcome {
            user: SanitizedUser::from(&confirmed),
            redirect_to,
        })
    }

    /// Send a fresh confirmation link to an unconfirmed account
    pub async fn resend(&self, email: Option<&str>) -> RegistrationResult<ResendOutcome> {
        let email = email
            .and_then(normalize_email)
            .ok_or(RegistrationError::MissingEmail)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(RegistrationError::UserNotFound)?;

        if user.confirmed {
            return Err(RegistrationError::AlreadyConfirmed);
        }
        if user.blocked {
            return Err(RegistrationError::Blocked);
        }

        self.notifier
            .send_confirmation_email(&SanitizedUser::from(&user))
            .await
            .map_err(|err| RegistrationError::ConfirmationDeliveryFailed(err.to_string()))?;

        Ok(ResendOutcome { email, sent: true })
    }
}
