use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::PasswordError;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::access::login;
use super::handlers::access::register;
use super::handlers::comments::add_comment;
use super::handlers::comments::list_comments;
use super::handlers::posts::create_post;
use super::handlers::posts::delete_post;
use super::handlers::posts::get_post;
use super::handlers::posts::list_posts;
use super::handlers::posts::list_posts_by_author;
use super::handlers::posts::search_posts;
use super::handlers::posts::update_post;
use super::handlers::users::delete_user;
use super::handlers::users::get_user;
use super::handlers::users::list_users;
use super::handlers::ApiError;
use super::middleware::authenticate as auth_middleware;
use super::middleware::GateState;
use super::policy::AccessPolicy;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::service::AuthService;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::comment::ports::CommentServicePort;
use crate::domain::comment::service::CommentService;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::post::service::PostService;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;

/// Service dependencies shared by all HTTP handlers.
///
/// Held as trait objects so the same router runs over Postgres or the
/// in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub comment_service: Arc<dyn CommentServicePort>,
}

impl AppState {
    /// Wire the domain services over one set of repositories.
    ///
    /// # Errors
    /// * `PasswordError` - The authenticator cannot hash with its configured cost
    pub fn from_repositories<UR, PR, CR>(
        users: Arc<UR>,
        posts: Arc<PR>,
        comments: Arc<CR>,
        authenticator: Arc<Authenticator>,
    ) -> Result<Self, PasswordError>
    where
        UR: UserRepository,
        PR: PostRepository,
        CR: CommentRepository,
    {
        Ok(Self {
            auth_service: Arc::new(AuthService::new(Arc::clone(&users), authenticator)?),
            user_service: Arc::new(UserService::new(users)),
            post_service: Arc::new(PostService::new(Arc::clone(&posts))),
            comment_service: Arc::new(CommentService::new(comments, posts)),
        })
    }
}

pub fn create_router(state: AppState, policy: AccessPolicy) -> Router {
    let gate = GateState::new(Arc::clone(&state.auth_service), Arc::new(policy));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers stay out of the span: they carry bearer tokens.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/users", get(list_users))
        .route("/api/users/:user_id", get(get_user).delete(delete_user))
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/search", get(search_posts))
        .route("/api/posts/author/:user_id", get(list_posts_by_author))
        .route(
            "/api/posts/:post_id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route(
            "/api/posts/:post_id/comments",
            get(list_comments).post(add_comment),
        )
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(gate, auth_middleware))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}
