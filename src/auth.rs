//! Password hashing and access-token handling.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::Json,
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schemas::{AppState, ErrorResponse};

/// Errors produced by credential and token handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Covers unknown email, wrong password, and unreadable stored hashes,
    /// so callers cannot tell which field was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("password hashing failed")]
    PasswordHash,
    #[error("token is missing, expired, or malformed")]
    InvalidToken,
}

/// Claims embedded in an issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the authenticated user.
    pub sub: String,
    /// Stored role, `user` or `admin`.
    pub role: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Token-signing configuration, shared across handlers through
/// [`AppState`].
#[derive(Clone)]
pub struct AuthConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: i64,
}

// Manual Debug so the signing secret never reaches a log line.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("expiry_secs", &self.expiry_secs)
            .finish_non_exhaustive()
    }
}

impl AuthConfig {
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
        }
    }

    /// Issue a signed token carrying the user's email and role.
    pub fn issue_token(&self, email: &str, role: &str) -> Result<String, AuthError> {
        let claims = Claims {
            sub: email.to_string(),
            role: role.to_string(),
            exp: Utc::now().timestamp() + self.expiry_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Decode and validate a token, returning its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Hash a password for storage. The plaintext goes out of scope here and is
/// never stored or logged.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Bearer-token extractor. A handler that takes this as an argument rejects
/// requests without a valid token before touching the database.
#[derive(Debug, Clone)]
pub struct AuthBearer(pub Claims);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthBearer {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(invalid_token_rejection)?;

        let claims = state
            .auth
            .verify_token(token)
            .map_err(|_| invalid_token_rejection())?;

        Ok(AuthBearer(claims))
    }
}

fn invalid_token_rejection() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "A valid bearer token is required".to_string(),
            code: "INVALID_TOKEN".to_string(),
            success: false,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_preserves_claims() {
        let config = AuthConfig::new("unit-test-secret", 3600);

        let token = config.issue_token("a@x.com", "user").unwrap();
        let claims = config.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, "user");

        let now = Utc::now().timestamp();
        assert!(claims.exp >= now + 3590 && claims.exp <= now + 3610);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60 second validation leeway.
        let config = AuthConfig::new("unit-test-secret", -120);

        let token = config.issue_token("a@x.com", "user").unwrap();

        assert!(config.verify_token(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let issuer = AuthConfig::new("secret-one", 3600);
        let verifier = AuthConfig::new("secret-two", 3600);

        let token = issuer.issue_token("a@x.com", "admin").unwrap();

        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_password_hash_verifies() {
        let hash = hash_password("hunter2hunter2").unwrap();

        assert_ne!(hash, "hunter2hunter2");
        assert!(verify_password("hunter2hunter2", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("correct-password").unwrap();

        assert!(matches!(
            verify_password("wrong-password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_garbage_hash_rejected_as_invalid_credentials() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
