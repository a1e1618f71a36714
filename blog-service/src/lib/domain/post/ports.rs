use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostAuthor;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn get_post(&self, id: &PostId) -> Result<Post, PostError>;

    async fn create_post(
        &self,
        command: CreatePostCommand,
        author: PostAuthor,
    ) -> Result<Post, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn update_post(&self, id: &PostId, command: UpdatePostCommand)
        -> Result<Post, PostError>;

    /// Delete a post and its comments.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn delete_post(&self, id: &PostId) -> Result<(), PostError>;

    /// Posts whose title contains `query`, ignoring case.
    async fn search_by_title(&self, query: &str) -> Result<Vec<Post>, PostError>;

    /// Posts written by `author_id`, newest first.
    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, PostError>;
}

/// Persistence operations for post aggregate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create(&self, post: Post) -> Result<Post, RepositoryError>;

    /// # Returns
    /// `false` if no post has this id
    async fn update(&self, post: &Post) -> Result<bool, RepositoryError>;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Post>, RepositoryError>;

    /// Case-insensitive substring match on the title.
    async fn search_by_title(&self, query: &str) -> Result<Vec<Post>, RepositoryError>;

    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, RepositoryError>;

    /// Remove the post together with its comments.
    ///
    /// # Returns
    /// `false` if no post had this id
    async fn delete(&self, id: &PostId) -> Result<bool, RepositoryError>;
}
