use std::sync::Arc;

use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtCodec;
use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Knows nothing about where identities live: callers look the stored hash up
/// and hand it in. Both collaborators are injected so a service can share one
/// codec between login and request validation.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_codec: Arc<JwtCodec>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    pub fn new(password_hasher: PasswordHasher, jwt_codec: Arc<JwtCodec>) -> Self {
        Self {
            password_hasher,
            jwt_codec,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password without issuing anything.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the stored hash is unusable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.jwt_codec.issue(subject)?)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, tampered with, or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_codec.decode(token)
    }
}
