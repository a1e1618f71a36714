use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::parse_post_id;
use super::single_with_comments;
use super::PostData;
use super::PostRequest;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(body): Json<PostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post_id = parse_post_id(&post_id)?;
    let (title, content) = body.try_into_parts()?;

    let post = state
        .post_service
        .update_post(&post_id, UpdatePostCommand { title, content })
        .await?;
    let post = single_with_comments(&state, post).await?;

    Ok(ApiSuccess::new(StatusCode::OK, post))
}
