use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::comment::models::Comment;

pub mod add_comment;
pub mod list_comments;

pub use add_comment::add_comment;
pub use list_comments::list_comments;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentData {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub author_username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentData {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author_id: comment.author.id.to_string(),
            author_username: comment.author.username.as_str().to_string(),
            content: comment.content.as_str().to_string(),
            created_at: comment.created_at,
        }
    }
}
