//! Registration settings read from the plugin store.

use serde::{Deserialize, Serialize};

/// Plugin-store key holding [`RegistrationSettings`].
pub const SETTINGS_KEY: &str = "advanced";

/// Operator-controlled switches for self-service registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationSettings {
    pub allow_register: bool,
    /// Role `type` assigned to every self-registered user
    pub default_role: String,
    pub email_confirmation: bool,
    /// Where the confirmation link lands after a successful confirmation
    pub email_confirmation_redirection: Option<String>,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            allow_register: true,
            default_role: "authenticated".to_string(),
            email_confirmation: false,
            email_confirmation_redirection: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings: RegistrationSettings =
            serde_json::from_str(r#"{"email_confirmation":true}"#).unwrap();

        assert!(settings.allow_register);
        assert!(settings.email_confirmation);
        assert_eq!(settings.default_role, "authenticated");
        assert_eq!(settings.email_confirmation_redirection, None);
    }
}
