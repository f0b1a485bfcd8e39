//! Credential primitives for Registrar: signed session tokens, password
//! hashing, and email-confirmation tokens.

pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::{Claims, JwtIssuer};
pub use password::{hash_password, verify_password};
pub use token::generate_confirmation_token;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token creation failed: {0}")]
    TokenCreation(String),
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
}
