//! Error types for registration and confirmation.

use registrar_database::DatabaseError;
use thiserror::Error;

/// Stable identifiers returned to admin clients instead of prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageId {
    AllowRegister,
    PasswordProvide,
    EmailProvide,
    EmailTaken,
    RoleNotFound,
    TokenInvalid,
    UserNotExist,
    AlreadyConfirmed,
    Blocked,
}

impl MessageId {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageId::AllowRegister => "Auth.advanced.allow_register",
            MessageId::PasswordProvide => "Auth.form.error.password.provide",
            MessageId::EmailProvide => "Auth.form.error.email.provide",
            MessageId::EmailTaken => "Auth.form.error.email.taken",
            MessageId::RoleNotFound => "Auth.form.error.role.notFound",
            MessageId::TokenInvalid => "Auth.form.error.token.invalid",
            MessageId::UserNotExist => "Auth.form.error.user.not-exist",
            MessageId::AlreadyConfirmed => "Auth.form.error.already.confirmed",
            MessageId::Blocked => "Auth.form.error.blocked",
        }
    }
}

/// Failures of the registration and confirmation flows.
///
/// The display string of each caller-correctable variant is the message
/// shown to public clients.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Register action is currently disabled.")]
    RegistrationDisabled,

    #[error("Please provide your password.")]
    MissingPassword,

    #[error("Please provide your email.")]
    MissingEmail,

    #[error("Email is already taken.")]
    EmailTaken,

    #[error("Impossible to find the default role.")]
    DefaultRoleNotFound,

    #[error("{0}")]
    ConfirmationDeliveryFailed(String),

    #[error("Invalid token.")]
    InvalidConfirmationToken,

    #[error("This email does not exist.")]
    UserNotFound,

    #[error("This email is already confirmed.")]
    AlreadyConfirmed,

    #[error("Your account has been blocked by the administrator.")]
    Blocked,

    #[error("storage failure: {0}")]
    Store(#[from] DatabaseError),

    #[error("credential issuing failed: {0}")]
    Credential(String),
}

impl RegistrationError {
    /// Identifier for admin clients. `None` for variants that carry a detail
    /// string or are not the caller's fault.
    pub fn message_id(&self) -> Option<MessageId> {
        match self {
            RegistrationError::RegistrationDisabled => Some(MessageId::AllowRegister),
            RegistrationError::MissingPassword => Some(MessageId::PasswordProvide),
            RegistrationError::MissingEmail => Some(MessageId::EmailProvide),
            RegistrationError::EmailTaken => Some(MessageId::EmailTaken),
            RegistrationError::DefaultRoleNotFound => Some(MessageId::RoleNotFound),
            RegistrationError::InvalidConfirmationToken => Some(MessageId::TokenInvalid),
            RegistrationError::UserNotFound => Some(MessageId::UserNotExist),
            RegistrationError::AlreadyConfirmed => Some(MessageId::AlreadyConfirmed),
            RegistrationError::Blocked => Some(MessageId::Blocked),
            RegistrationError::ConfirmationDeliveryFailed(_)
            | RegistrationError::Store(_)
            | RegistrationError::Credential(_) => None,
        }
    }

    /// Whether the failure is reported as a bad request rather than a
    /// server error.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            RegistrationError::Store(_) | RegistrationError::Credential(_)
        )
    }
}

/// Delivery failures raised by a confirmation notifier
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("could not store confirmation token: {0}")]
    Store(#[from] DatabaseError),

    #[error(transparent)]
    Mail(#[from] MailError),
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport request failed: {0}")]
    Transport(String),

    #[error("mail transport rejected message with status {0}")]
    Rejected(u16),
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;
