use std::cmp::Reverse;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::comment::models::Comment;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

/// Process-local store backing all three repositories.
///
/// Used when no database is configured and by the integration tests. One
/// lock guards every table so cascading deletes are atomic.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(rows: impl Iterator<Item = T>, key: impl Fn(&T) -> i64) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.reverse();
    rows.sort_by_key(|row| Reverse(key(row)));
    rows
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == *username).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.users.iter().cloned(), |u| {
            u.created_at.timestamp_micros()
        }))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;

        let before = tables.users.len();
        tables.users.retain(|u| u.id != *id);
        if tables.users.len() == before {
            return Ok(false);
        }

        let removed_posts: Vec<PostId> = tables
            .posts
            .iter()
            .filter(|p| p.author.id == *id)
            .map(|p| p.id)
            .collect();
        tables.posts.retain(|p| p.author.id != *id);
        tables
            .comments
            .retain(|c| c.author.id != *id && !removed_posts.contains(&c.post_id));

        Ok(true)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, post: Post) -> Result<Post, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: &Post) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;

        match tables.posts.iter_mut().find(|p| p.id == post.id) {
            Some(stored) => {
                stored.title = post.title.clone();
                stored.content = post.content.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.posts.iter().cloned(), |p| {
            p.created_at.timestamp_micros()
        }))
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Post>, RepositoryError> {
        let needle = query.to_lowercase();
        let tables = self.tables.read().await;

        Ok(newest_first(
            tables
                .posts
                .iter()
                .filter(|p| p.title.as_str().to_lowercase().contains(&needle))
                .cloned(),
            |p| p.created_at.timestamp_micros(),
        ))
    }

    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, RepositoryError> {
        let tables = self.tables.read().await;

        Ok(newest_first(
            tables
                .posts
                .iter()
                .filter(|p| p.author.id == *author_id)
                .cloned(),
            |p| p.created_at.timestamp_micros(),
        ))
    }

    async fn delete(&self, id: &PostId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;

        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != *id);
        if tables.posts.len() == before {
            return Ok(false);
        }

        tables.comments.retain(|c| c.post_id != *id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create(&self, comment: Comment) -> Result<Comment, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, RepositoryError> {
        let tables = self.tables.read().await;

        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.post_id == *post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    async fn find_by_posts(&self, post_ids: &[PostId]) -> Result<Vec<Comment>, RepositoryError> {
        let tables = self.tables.read().await;

        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| post_ids.contains(&c.post_id))
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }
}
