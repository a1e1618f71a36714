use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CreateCommentCommand;
use crate::domain::errors::RepositoryError;
use crate::domain::post::models::PostAuthor;
use crate::domain::post::models::PostId;

/// Port for comment domain service operations.
#[async_trait]
pub trait CommentServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `PostNotFound` - No post with `post_id`
    async fn add_comment(
        &self,
        post_id: &PostId,
        command: CreateCommentCommand,
        author: PostAuthor,
    ) -> Result<Comment, CommentError>;

    /// Comments on a post, oldest first.
    ///
    /// # Errors
    /// * `PostNotFound` - No post with `post_id`
    async fn list_comments(&self, post_id: &PostId) -> Result<Vec<Comment>, CommentError>;

    /// Comments on each of `post_ids`, oldest first, in one store round trip.
    ///
    /// Posts without comments map to an empty list. Unknown ids are not an error.
    async fn comments_for_posts(
        &self,
        post_ids: &[PostId],
    ) -> Result<HashMap<PostId, Vec<Comment>>, CommentError>;
}

/// Persistence operations for comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync + 'static {
    async fn create(&self, comment: Comment) -> Result<Comment, RepositoryError>;

    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, RepositoryError>;

    /// Comments on any of `post_ids`, oldest first.
    async fn find_by_posts(&self, post_ids: &[PostId]) -> Result<Vec<Comment>, RepositoryError>;
}
