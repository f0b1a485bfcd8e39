//! Domain entities exposed by the registration services.

pub mod settings;
pub mod user;

pub use settings::{RegistrationSettings, SETTINGS_KEY};
pub use user::SanitizedUser;
