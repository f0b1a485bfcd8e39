//! Registration, confirmation and mail delivery services.

pub mod confirmation_service;
pub mod credentials;
pub mod mailer;
pub mod notifier;
pub mod registration_service;

#[cfg(test)]
mod mock_repositories;

pub use confirmation_service::ConfirmationService;
pub use credentials::CredentialIssuer;
pub use mailer::{LogTransport, MailTransport, OutgoingMail, WebhookTransport};
pub use notifier::{ConfirmationNotifier, EmailConfirmationNotifier};
pub use registration_service::RegistrationService;
