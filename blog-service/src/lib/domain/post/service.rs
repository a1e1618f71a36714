use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostAuthor;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        Ok(self.repository.find_all().await?)
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }

    async fn create_post(
        &self,
        command: CreatePostCommand,
        author: PostAuthor,
    ) -> Result<Post, PostError> {
        let post = Post {
            id: PostId::new(),
            title: command.title,
            content: command.content,
            author,
            created_at: Utc::now(),
        };

        let post = self.repository.create(post).await?;

        tracing::info!(post_id = %post.id, author = %post.author.username, "Post created");
        Ok(post)
    }

    async fn update_post(
        &self,
        id: &PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self.get_post(id).await?;
        post.title = command.title;
        post.content = command.content;

        if !self.repository.update(&post).await? {
            return Err(PostError::NotFound(id.to_string()));
        }

        tracing::info!(post_id = %id, "Post updated");
        Ok(post)
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), PostError> {
        if !self.repository.delete(id).await? {
            return Err(PostError::NotFound(id.to_string()));
        }

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Post>, PostError> {
        Ok(self.repository.search_by_title(query.trim()).await?)
    }

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, PostError> {
        Ok(self.repository.find_by_author(author_id).await?)
    }
}
