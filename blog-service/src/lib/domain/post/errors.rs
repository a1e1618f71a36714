use thiserror::Error;

use crate::domain::errors::RepositoryError;

/// Error for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for PostTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostTitleError {
    #[error("Title is required")]
    Blank,

    #[error("Title must be between {min} and {max} characters, got {actual}")]
    Length { min: usize, max: usize, actual: usize },
}

/// Error for PostContent validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostContentError {
    #[error("Content is required")]
    Blank,

    #[error("Content must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Top-level error for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] PostTitleError),

    #[error("Invalid content: {0}")]
    InvalidContent(#[from] PostContentError),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
