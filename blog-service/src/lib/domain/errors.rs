use thiserror::Error;

/// Failure reported by a persistence adapter.
///
/// `Unavailable` means the store could not be reached at all; callers must
/// not read it as "record absent".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}
