pub mod comment;
pub mod memory;
pub mod post;
pub mod user;

pub use comment::PostgresCommentRepository;
pub use memory::InMemoryStore;
pub use post::PostgresPostRepository;
pub use user::PostgresUserRepository;

use crate::domain::errors::RepositoryError;

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => RepositoryError::Unavailable(error.to_string()),
            _ => RepositoryError::Database(error.to_string()),
        }
    }
}

/// A stored row no longer satisfies the domain's value rules.
pub(crate) fn corrupt_row(table: &str, error: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Database(format!("invalid {} row: {}", table, error))
}
