use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::auth::models::Credentials;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Exchange username and password for a bearer token.
///
/// The body is a bare `{"token": ...}` object, not the usual envelope.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let issued = state
        .auth_service
        .login(Credentials::new(body.username, body.password))
        .await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token: issued.token,
        }),
    ))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub token: String,
}
