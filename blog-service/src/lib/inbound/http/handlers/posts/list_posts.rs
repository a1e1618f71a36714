use axum::extract::State;
use axum::http::StatusCode;

use super::with_comments;
use super::PostData;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    let posts = state.post_service.list_posts().await?;
    let posts = with_comments(&state, posts).await?;

    Ok(ApiSuccess::new(StatusCode::OK, posts))
}
