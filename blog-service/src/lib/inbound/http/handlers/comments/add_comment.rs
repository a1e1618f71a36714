use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::CommentData;
use crate::domain::auth::models::AuthenticatedPrincipal;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::CommentContent;
use crate::domain::comment::models::CreateCommentCommand;
use crate::domain::comment::ports::CommentServicePort;
use crate::domain::post::models::PostAuthor;
use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddCommentRequest {
    content: String,
}

pub async fn add_comment(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(post_id): Path<String>,
    Json(body): Json<AddCommentRequest>,
) -> Result<ApiSuccess<CommentData>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(CommentError::from)?;
    let content = CommentContent::new(body.content).map_err(CommentError::from)?;

    state
        .comment_service
        .add_comment(
            &post_id,
            CreateCommentCommand { content },
            PostAuthor::from(&principal.user),
        )
        .await
        .map_err(ApiError::from)
        .map(|ref comment| ApiSuccess::new(StatusCode::CREATED, comment.into()))
}
