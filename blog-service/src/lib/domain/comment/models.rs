use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::comment::errors::CommentContentError;
use crate::domain::post::models::PostAuthor;
use crate::domain::post::models::PostId;

/// A comment left on a post by an authenticated user.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: PostAuthor,
    pub content: CommentContent,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Comment body, non-blank and at most 800 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    const MAX_LENGTH: usize = 800;

    pub fn new(content: String) -> Result<Self, CommentContentError> {
        let length = content.chars().count();

        if content.trim().is_empty() {
            Err(CommentContentError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(CommentContentError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(content))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct CreateCommentCommand {
    pub content: CommentContent,
}
