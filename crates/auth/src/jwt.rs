//! JWT (JSON Web Token) issuing and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use registrar_config::AuthConfig;
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Claims carried by a session token. The token binds to a user id only.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Stateless HS256 token issuer
#[derive(Clone)]
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl JwtIssuer {
    pub fn new(secret: &str, token_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        let ttl_seconds = i64::try_from(config.jwt_ttl_seconds).unwrap_or(i64::MAX);
        let token_ttl = Duration::try_seconds(ttl_seconds).unwrap_or(Duration::MAX);
        Self::new(&config.jwt_secret, token_ttl)
    }

    /// Sign a token for `user_id`
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.token_ttl)
            .map(|at| at.timestamp())
            .unwrap_or(i64::MAX);

        let claims = Claims {
            id: user_id,
            iat: now.timestamp(),
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::TokenCreation(err.to_string()))
    }

    /// Validate the signature and expiry of `token`
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| AuthError::InvalidToken(err.to_string()))
    }
}
