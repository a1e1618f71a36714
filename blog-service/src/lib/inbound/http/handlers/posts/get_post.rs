use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_post_id;
use super::single_with_comments;
use super::PostData;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;

    let post = state.post_service.get_post(&post_id).await?;
    let post = single_with_comments(&state, post).await?;

    Ok(ApiSuccess::new(StatusCode::OK, post))
}
