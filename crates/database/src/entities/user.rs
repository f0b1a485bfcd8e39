//! User entity definitions

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Provider recorded for accounts created through email/password registration.
pub const LOCAL_PROVIDER: &str = "local";

/// User row as stored in the `users` table.
///
/// `password` holds the argon2 hash and `confirmation_token` the pending
/// email-confirmation token; neither is ever serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub provider: String,
    pub role: i64,
    pub confirmed: bool,
    pub blocked: bool,
    #[serde(skip_serializing)]
    pub confirmation_token: Option<String>,
    pub profile: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a user. The password must already be hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub provider: String,
    pub role: i64,
    pub confirmed: bool,
    pub profile: Map<String, Value>,
}
