use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::CommentData;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::ports::CommentServicePort;
use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<Vec<CommentData>>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(CommentError::from)?;

    state
        .comment_service
        .list_comments(&post_id)
        .await
        .map_err(ApiError::from)
        .map(|comments| {
            ApiSuccess::new(
                StatusCode::OK,
                comments.iter().map(CommentData::from).collect(),
            )
        })
}
