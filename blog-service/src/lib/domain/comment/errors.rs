use thiserror::Error;

use crate::domain::errors::RepositoryError;
use crate::domain::post::errors::PostIdError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentContentError {
    #[error("Comment is required")]
    Blank,

    #[error("Comment must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error)]
pub enum CommentError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid comment: {0}")]
    InvalidContent(#[from] CommentContentError),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
