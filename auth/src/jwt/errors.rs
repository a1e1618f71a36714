use thiserror::Error;

/// Error type for JWT operations.
///
/// The decode-side variants are kept apart so callers can log the precise
/// cause, even though all of them end up as the same rejection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}
