//! Caller-facing user representation.

use chrono::{DateTime, Utc};
use registrar_database::UserRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile keys that never leave the service, whatever the stored shape.
const PRIVATE_PROFILE_KEYS: &[&str] = &["password", "resetPasswordToken", "confirmationToken"];

/// Top-level fields of [`SanitizedUser`]; profile keys with these names are
/// dropped so the flattened object has no duplicates.
const RESERVED_FIELDS: &[&str] = &[
    "id",
    "email",
    "provider",
    "role",
    "confirmed",
    "blocked",
    "created_at",
    "updated_at",
];

/// A [`UserRecord`] with every secret stripped. This is the only user shape
/// the services hand back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizedUser {
    pub id: i64,
    pub email: String,
    pub provider: String,
    pub role: i64,
    pub confirmed: bool,
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl From<&UserRecord> for SanitizedUser {
    fn from(record: &UserRecord) -> Self {
        let profile = record
            .profile
            .iter()
            .filter(|(key, _)| {
                !PRIVATE_PROFILE_KEYS.contains(&key.as_str())
                    && !RESERVED_FIELDS.contains(&key.as_str())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            id: record.id,
            email: record.email.clone(),
            provider: record.provider.clone(),
            role: record.role,
            confirmed: record.confirmed,
            blocked: record.blocked,
            created_at: record.created_at,
            updated_at: record.updated_at,
            profile,
        }
    }
}

impl From<UserRecord> for SanitizedUser {
    fn from(record: UserRecord) -> Self {
        Self::from(&record)
    }
}
