//! Self-service registration.

use std::sync::Arc;

use registrar_auth::hash_password;
use registrar_database::{NewUser, LOCAL_PROVIDER};
use tracing::{info, warn};

use super::credentials::CredentialIssuer;
use super::notifier::ConfirmationNotifier;
use crate::entities::SanitizedUser;
use crate::repositories::{RoleStore, SettingsProvider, UserStore};
use crate::types::{RegisterRequest, RegistrationError, RegistrationOutcome, RegistrationResult};

/// Validates a registration request, creates the account and either issues
/// a session token or starts email confirmation.
pub struct RegistrationService {
    settings: Arc<dyn SettingsProvider>,
    users: Arc<dyn UserStore>,
    roles: Arc<dyn RoleStore>,
    credentials: Arc<dyn CredentialIssuer>,
    notifier: Arc<dyn ConfirmationNotifier>,
}

impl RegistrationService {
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        credentials: Arc<dyn CredentialIssuer>,
        notifier: Arc<dyn ConfirmationNotifier>,
    ) -> Self {
        Self {
            settings,
            users,
            roles,
            credentials,
            notifier,
        }
    }

    /// Register a new local account.
    ///
    /// Checks run in a fixed order and the first failure is returned before
    /// anything is written: registration gate, password, email, email
    /// uniqueness, default role. If the confirmation email cannot be sent
    /// the account stays persisted and unconfirmed.
    pub async fn register(&self, request: RegisterRequest) -> RegistrationResult<RegistrationOutcome> {
        let settings = self.settings.registration_settings().await?;
        if !settings.allow_register {
            return Err(RegistrationError::RegistrationDisabled);
        }

        let password = request.password().ok_or(RegistrationError::MissingPassword)?;
        let email = request
            .normalized_email()
            .ok_or(RegistrationError::MissingEmail)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(RegistrationError::EmailTaken);
        }

        let role = self
            .roles
            .find_by_type(&settings.default_role)
            .await?
            .ok_or(RegistrationError::DefaultRoleNotFound)?;

        let password_hash =
            hash_password(password).map_err(|err| RegistrationError::Credential(err.to_string()))?;

        let new_user = NewUser {
            email,
            password_hash,
            provider: LOCAL_PROVIDER.to_string(),
            role: role.id,
            confirmed: !settings.email_confirmation,
            profile: request.profile(),
        };

        // A concurrent registration can still win the race past the lookup above.
        let record = self.users.create(&new_user).await.map_err(|err| {
            if err.is_duplicate() {
                RegistrationError::EmailTaken
            } else {
                RegistrationError::Store(err)
            }
        })?;

        info!(
            user_id = record.id,
            role = %role.role_type,
            confirmed = record.confirmed,
            "registered new user"
        );

        let user = SanitizedUser::from(&record);

        if settings.email_confirmation {
            if let Err(err) = self.notifier.send_confirmation_email(&user).await {
                warn!(user_id = user.id, error = %err, "confirmation email failed, account left unconfirmed");
                return Err(RegistrationError::ConfirmationDeliveryFailed(err.to_string()));
            }
            return Ok(RegistrationOutcome::PendingConfirmation { user });
        }

        let jwt = self
            .credentials
            .issue(record.id)
            .map_err(|err| RegistrationError::Credential(err.to_string()))?;

        Ok(RegistrationOutcome::Authenticated { jwt, user })
    }
}
