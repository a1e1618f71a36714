use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::with_comments;
use super::PostData;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_posts_by_author(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    let author_id =
        UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let posts = state.post_service.list_by_author(&author_id).await?;
    let posts = with_comments(&state, posts).await?;

    Ok(ApiSuccess::new(StatusCode::OK, posts))
}
