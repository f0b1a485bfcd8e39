//! Shared request, response and error types.

pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::{MailError, MessageId, NotifierError, RegistrationError, RegistrationResult};
pub use requests::{normalize_email, RegisterRequest, ResendConfirmationRequest};
pub use responses::{ConfirmationOutcome, RegistrationOutcome, ResendOutcome};
