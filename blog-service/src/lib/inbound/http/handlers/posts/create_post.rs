use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::PostData;
use super::PostRequest;
use crate::domain::auth::models::AuthenticatedPrincipal;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::PostAuthor;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Create a post authored by the caller.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Json(body): Json<PostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let (title, content) = body.try_into_parts()?;

    state
        .post_service
        .create_post(
            CreatePostCommand { title, content },
            PostAuthor::from(&principal.user),
        )
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, PostData::new(post, Vec::new())))
}
