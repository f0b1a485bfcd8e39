//! Request payloads accepted by the services.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Body keys a client may not set; the server assigns them.
const RESERVED_KEYS: &[&str] = &[
    "id",
    "provider",
    "role",
    "confirmed",
    "blocked",
    "confirmationToken",
    "resetPasswordToken",
    "created_at",
    "updated_at",
];

/// Accepts any JSON value; anything but a string reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}

/// Self-registration input. Everything besides `email` and `password` is
/// kept as open profile data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegisterRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            extra: Map::new(),
        }
    }

    /// Build a request from an arbitrary JSON body. Bodies that are not
    /// objects carry no fields at all.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Non-empty password, if one was supplied
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|password| !password.is_empty())
    }

    /// Lower-cased email, if a non-blank one was supplied
    pub fn normalized_email(&self) -> Option<String> {
        self.email.as_deref().and_then(normalize_email)
    }

    /// Extra fields with server-assigned keys removed
    pub fn profile(&self) -> Map<String, Value> {
        self.extra
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Body of a confirmation resend request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResendConfirmationRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
}

pub fn normalize_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_splits_known_fields_from_profile() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "email": "A@B.com",
            "password": "x",
            "username": "alice",
            "role": 1,
            "confirmed": true
        }))
        .unwrap();

        assert_eq!(request.normalized_email().as_deref(), Some("a@b.com"));
        assert_eq!(request.password(), Some("x"));

        let profile = request.profile();
        assert_eq!(profile.get("username"), Some(&json!("alice")));
        assert!(!profile.contains_key("role"));
        assert!(!profile.contains_key("confirmed"));
        assert!(!profile.contains_key("email"));
        assert!(!profile.contains_key("password"));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let request: RegisterRequest =
            serde_json::from_value(json!({"email": "   ", "password": ""})).unwrap();
        assert_eq!(request.normalized_email(), None);
        assert_eq!(request.password(), None);

        let request: RegisterRequest = serde_json::from_value(json!({"email": null})).unwrap();
        assert_eq!(request.normalized_email(), None);
        assert_eq!(request.password(), None);
    }

    #[test]
    fn test_non_string_credentials_count_as_missing() {
        let request = RegisterRequest::from_body(json!({
            "email": 5,
            "password": ["x"],
            "username": "alice"
        }));
        assert_eq!(request.normalized_email(), None);
        assert_eq!(request.password(), None);
        assert_eq!(request.profile().get("username"), Some(&json!("alice")));

        let request = RegisterRequest::from_body(json!({"email": "a@b.com", "password": 123}));
        assert_eq!(request.normalized_email().as_deref(), Some("a@b.com"));
        assert_eq!(request.password(), None);
    }

    #[test]
    fn test_non_object_body_is_an_empty_request() {
        assert_eq!(RegisterRequest::from_body(json!([1, 2])), RegisterRequest::default());
        assert_eq!(RegisterRequest::from_body(json!("a@b.com")), RegisterRequest::default());
        assert_eq!(RegisterRequest::from_body(Value::Null), RegisterRequest::default());
    }
}
