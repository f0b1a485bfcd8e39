//! Session credentials handed out on registration.

use registrar_auth::{AuthError, JwtIssuer};

/// Issues the session credential returned after a successful registration.
pub trait CredentialIssuer: Send + Sync {
    fn issue(&self, user_id: i64) -> Result<String, AuthError>;
}

impl CredentialIssuer for JwtIssuer {
    fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        JwtIssuer::issue(self, user_id)
    }
}
