//! # Registrar Users Crate
//!
//! Self-service registration and email confirmation for Registrar.
//!
//! ## Architecture
//!
//! - **Entities**: caller-facing user shape and registration settings
//! - **Repositories**: storage traits plus adapters for the SQLite repositories
//! - **Services**: registration, confirmation, notifier and mail transports
//! - **Types**: requests, outcomes and errors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registrar_users::{RegisterRequest, RegistrationService};
//!
//! let service = RegistrationService::new(settings, users, roles, issuer, notifier);
//! let outcome = service.register(RegisterRequest::new("a@b.com", "secret")).await?;
//! ```

pub mod entities;
pub mod repositories;
pub mod services;
pub mod types;

pub use entities::{RegistrationSettings, SanitizedUser, SETTINGS_KEY};
pub use repositories::{PluginStoreSettings, RoleStore, SettingsProvider, UserStore};
pub use services::{
    ConfirmationNotifier, ConfirmationService, CredentialIssuer, EmailConfirmationNotifier,
    LogTransport, MailTransport, OutgoingMail, RegistrationService, WebhookTransport,
};
pub use types::{
    ConfirmationOutcome, MailError, MessageId, NotifierError, RegisterRequest,
    RegistrationError, RegistrationOutcome, RegistrationResult, ResendConfirmationRequest,
    ResendOutcome,
};
