use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::corrupt_row;
use crate::domain::errors::RepositoryError;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostAuthor;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_post(row: PgRow) -> Result<Post, RepositoryError> {
        Ok(Post {
            id: PostId(row.try_get("id")?),
            title: PostTitle::new(row.try_get("title")?).map_err(|e| corrupt_row("posts", e))?,
            content: PostContent::new(row.try_get("content")?)
                .map_err(|e| corrupt_row("posts", e))?,
            author: PostAuthor {
                id: UserId(row.try_get("author_id")?),
                username: Username::new(row.try_get("author_username")?)
                    .map_err(|e| corrupt_row("posts", e))?,
            },
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Escape LIKE metacharacters so the query matches literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, author_id, author_username, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.0)
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .bind(post.author.id.0)
        .bind(post.author.username.as_str())
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update(&self, post: &Post) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3
            WHERE id = $1
            "#,
        )
        .bind(post.id.0)
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, author_id, author_username, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_post).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, author_id, author_username, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Post>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, author_id, author_username, created_at
            FROM posts
            WHERE title ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn find_by_author(&self, author_id: &UserId) -> Result<Vec<Post>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, author_id, author_username, created_at
            FROM posts
            WHERE author_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn delete(&self, id: &PostId) -> Result<bool, RepositoryError> {
        // Comments go with the post through ON DELETE CASCADE.
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
