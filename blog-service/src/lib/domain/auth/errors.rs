use auth::JwtError;
use thiserror::Error;

use crate::domain::errors::RepositoryError;

/// Outcome of a failed login or request authorization.
///
/// The variants stay distinct for logging. At the HTTP boundary every
/// rejection collapses into one opaque answer.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No identity for username: {0}")]
    IdentityNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token rejected: {0}")]
    Token(#[from] JwtError),

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal authentication error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether this error should result in a 401 (vs. a 5xx).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::IdentityNotFound(_) | AuthError::InvalidCredentials | AuthError::Token(_)
        )
    }

    /// Short machine-readable cause for log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::IdentityNotFound(_) => "unknown_identity",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Token(JwtError::Malformed(_)) => "malformed_token",
            AuthError::Token(JwtError::InvalidSignature) => "invalid_signature",
            AuthError::Token(JwtError::Expired) => "expired_token",
            AuthError::Token(JwtError::EncodingFailed(_)) => "token_encoding_failed",
            AuthError::StoreUnavailable(_) => "store_unavailable",
            AuthError::Internal(_) => "internal",
        }
    }
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unavailable(msg) => AuthError::StoreUnavailable(msg),
            RepositoryError::Database(msg) => AuthError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_vs_failures() {
        assert!(AuthError::IdentityNotFound("bob".to_string()).is_rejection());
        assert!(AuthError::InvalidCredentials.is_rejection());
        assert!(AuthError::Token(JwtError::Expired).is_rejection());
        assert!(!AuthError::StoreUnavailable("down".to_string()).is_rejection());
        assert!(!AuthError::Internal("boom".to_string()).is_rejection());
    }

    #[test]
    fn test_store_errors_are_never_rejections() {
        let unavailable: AuthError = RepositoryError::Unavailable("timeout".to_string()).into();
        assert!(matches!(unavailable, AuthError::StoreUnavailable(_)));

        let database: AuthError = RepositoryError::Database("bad row".to_string()).into();
        assert!(matches!(database, AuthError::Internal(_)));
    }

    #[test]
    fn test_reasons_distinguish_token_failures() {
        assert_eq!(AuthError::Token(JwtError::Expired).reason(), "expired_token");
        assert_eq!(
            AuthError::Token(JwtError::InvalidSignature).reason(),
            "invalid_signature"
        );
        assert_eq!(
            AuthError::Token(JwtError::Malformed("x".to_string())).reason(),
            "malformed_token"
        );
    }
}
