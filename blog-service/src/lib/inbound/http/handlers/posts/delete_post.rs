use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_post_id;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let post_id = parse_post_id(&post_id)?;

    state.post_service.delete_post(&post_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
