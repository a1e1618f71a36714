use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::corrupt_row;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentContent;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::post::models::PostAuthor;
use crate::domain::post::models::PostId;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_comment(row: PgRow) -> Result<Comment, RepositoryError> {
        Ok(Comment {
            id: CommentId(row.try_get("id")?),
            post_id: PostId(row.try_get("post_id")?),
            author: PostAuthor {
                id: UserId(row.try_get("author_id")?),
                username: Username::new(row.try_get("author_username")?)
                    .map_err(|e| corrupt_row("comments", e))?,
            },
            content: CommentContent::new(row.try_get("content")?)
                .map_err(|e| corrupt_row("comments", e))?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_id, author_username, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id.0)
        .bind(comment.post_id.0)
        .bind(comment.author.id.0)
        .bind(comment.author.username.as_str())
        .bind(comment.content.as_str())
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, post_id, author_id, author_username, content, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_comment).collect()
    }

    async fn find_by_posts(&self, post_ids: &[PostId]) -> Result<Vec<Comment>, RepositoryError> {
        let ids: Vec<uuid::Uuid> = post_ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, post_id, author_id, author_username, content, created_at
            FROM comments
            WHERE post_id = ANY($1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_comment).collect()
    }
}
