use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::comment::ports::CommentServicePort;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::inbound::http::handlers::comments::CommentData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod list_posts;
pub mod list_posts_by_author;
pub mod search_posts;
pub mod update_post;

pub use create_post::create_post;
pub use delete_post::delete_post;
pub use get_post::get_post;
pub use list_posts::list_posts;
pub use list_posts_by_author::list_posts_by_author;
pub use search_posts::search_posts;
pub use update_post::update_post;

/// Body shared by create and update: both carry the full title and content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRequest {
    title: String,
    content: String,
}

impl PostRequest {
    fn try_into_parts(self) -> Result<(PostTitle, PostContent), ApiError> {
        let title =
            PostTitle::new(self.title).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
        let content = PostContent::new(self.content)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
        Ok((title, content))
    }
}

/// A post as returned by every post endpoint, with its comments oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentData>,
}

impl PostData {
    fn new(post: &Post, comments: Vec<CommentData>) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.as_str().to_string(),
            content: post.content.as_str().to_string(),
            author_id: post.author.id.to_string(),
            author_username: post.author.username.as_str().to_string(),
            created_at: post.created_at,
            comments,
        }
    }
}

fn parse_post_id(raw: &str) -> Result<PostId, ApiError> {
    PostId::from_string(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Attach comments to `posts` with a single batched lookup, keeping post order.
async fn with_comments(state: &AppState, posts: Vec<Post>) -> Result<Vec<PostData>, ApiError> {
    let post_ids: Vec<PostId> = posts.iter().map(|post| post.id).collect();
    let mut comments = state.comment_service.comments_for_posts(&post_ids).await?;

    Ok(posts
        .iter()
        .map(|post| {
            let thread = comments.remove(&post.id).unwrap_or_default();
            PostData::new(post, thread.iter().map(CommentData::from).collect())
        })
        .collect())
}

async fn single_with_comments(state: &AppState, post: Post) -> Result<PostData, ApiError> {
    let mut comments = state.comment_service.comments_for_posts(&[post.id]).await?;
    let thread = comments.remove(&post.id).unwrap_or_default();

    Ok(PostData::new(&post, thread.iter().map(CommentData::from).collect()))
}
