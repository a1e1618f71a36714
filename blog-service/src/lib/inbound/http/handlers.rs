use auth::JwtError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::comment::errors::CommentError;
use crate::domain::errors::RepositoryError;
use crate::domain::post::errors::PostError;
use crate::user::errors::UserError;

pub mod access;
pub mod comments;
pub mod posts;
pub mod users;

/// Message for every rejected login; unknown user and wrong password look the same.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    ServiceUnavailable(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(error = %msg, "Backing store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unavailable(msg) => ApiError::ServiceUnavailable(msg),
            RepositoryError::Database(msg) => ApiError::InternalServerError(msg),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::InvalidUserId(_) => ApiError::BadRequest(err.to_string()),
            UserError::Repository(e) => e.into(),
            UserError::Password(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::StoreUnavailable(msg) => ApiError::ServiceUnavailable(msg),
            AuthError::Internal(msg) => ApiError::InternalServerError(msg),
            AuthError::Token(JwtError::EncodingFailed(msg)) => {
                ApiError::InternalServerError(msg)
            }
            AuthError::IdentityNotFound(_)
            | AuthError::InvalidCredentials
            | AuthError::Token(_) => ApiError::Unauthorized(AUTHENTICATION_FAILED.to_string()),
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound(_) => ApiError::NotFound(err.to_string()),
            PostError::InvalidPostId(_) => ApiError::BadRequest(err.to_string()),
            PostError::InvalidTitle(_) | PostError::InvalidContent(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            PostError::Repository(e) => e.into(),
        }
    }
}

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::PostNotFound(_) => ApiError::NotFound(err.to_string()),
            CommentError::InvalidPostId(_) => ApiError::BadRequest(err.to_string()),
            CommentError::InvalidContent(_) => ApiError::UnprocessableEntity(err.to_string()),
            CommentError::Repository(e) => e.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_auth_rejection_looks_the_same() {
        let unknown: ApiError = AuthError::IdentityNotFound("ghost".to_string()).into();
        let wrong: ApiError = AuthError::InvalidCredentials.into();
        let expired: ApiError = AuthError::Token(JwtError::Expired).into();

        assert_eq!(unknown, wrong);
        assert_eq!(wrong, expired);
        assert_eq!(
            unknown,
            ApiError::Unauthorized(AUTHENTICATION_FAILED.to_string())
        );
    }

    #[test]
    fn test_store_outage_maps_to_503() {
        let err: ApiError = AuthError::StoreUnavailable("timeout".to_string()).into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let err: ApiError = PostError::Repository(RepositoryError::Unavailable(
            "pool closed".to_string(),
        ))
        .into();
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn test_internal_details_are_not_returned() {
        let response =
            ApiError::InternalServerError("relation \"posts\" does not exist".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_conflicts_and_validation() {
        let conflict: ApiError = UserError::UsernameAlreadyExists("alice".to_string()).into();
        assert!(matches!(conflict, ApiError::Conflict(_)));

        let missing: ApiError = CommentError::PostNotFound("x".to_string()).into();
        assert!(matches!(missing, ApiError::NotFound(_)));
    }
}
