use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use super::policy::AccessPolicy;
use crate::domain::auth::ports::AuthServicePort;

const BEARER_PREFIX: &str = "Bearer ";

/// What the request gate needs: the authorizer and the allow-list.
#[derive(Clone)]
pub struct GateState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub policy: Arc<AccessPolicy>,
}

impl GateState {
    pub fn new(auth_service: Arc<dyn AuthServicePort>, policy: Arc<AccessPolicy>) -> Self {
        Self {
            auth_service,
            policy,
        }
    }
}

/// Middleware that requires a valid bearer token on every non-exempt path.
///
/// On success the resolved `AuthenticatedPrincipal` is put in the request
/// extensions. Rejections never reach the handler and all look the same to
/// the client; the cause only goes to the log.
pub async fn authenticate(
    State(gate): State<GateState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    if gate.policy.is_exempt(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let token = extract_token_from_header(req.headers()).map_err(|reason| {
        tracing::warn!(path = %req.uri().path(), reason, "Request rejected");
        unauthorized()
    })?;

    let principal = gate.auth_service.authorize(&token).await.map_err(|e| {
        if e.is_rejection() {
            tracing::warn!(path = %req.uri().path(), reason = e.reason(), "Request rejected");
            unauthorized()
        } else {
            ApiError::from(e).into_response()
        }
    })?;

    tracing::debug!(user_id = %principal.user_id(), "Request authorized");
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Token after an exact, case-sensitive `Bearer ` prefix.
fn extract_token_from_header(headers: &HeaderMap) -> Result<String, &'static str> {
    let header = headers.get(AUTHORIZATION).ok_or("missing_header")?;
    let value = header.to_str().map_err(|_| "invalid_header")?;

    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::to_string)
        .ok_or("invalid_scheme")
}

fn unauthorized() -> Response {
    ApiError::Unauthorized("Unauthorized".to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use auth::JwtError;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use axum::http::StatusCode;
    use axum::middleware;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::Utc;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::auth::errors::AuthError;
    use crate::domain::auth::models::AuthenticatedPrincipal;
    use crate::domain::auth::ports::MockAuthServicePort;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    fn alice() -> User {
        User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn app(auth_service: MockAuthServicePort, hits: Arc<AtomicUsize>) -> Router {
        let gate = GateState::new(
            Arc::new(auth_service),
            Arc::new(AccessPolicy::new(["/api/login"])),
        );
        let login_hits = Arc::clone(&hits);

        Router::new()
            .route(
                "/api/posts",
                get(move |Extension(principal): Extension<AuthenticatedPrincipal>| {
                    let hits = Arc::clone(&hits);
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        principal.username.as_str().to_string()
                    }
                }),
            )
            .route(
                "/api/login",
                get(move || {
                    let hits = Arc::clone(&login_hits);
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        "open"
                    }
                }),
            )
            .layer(middleware::from_fn_with_state(gate, authenticate))
    }

    fn request(path: &str, authorization: Option<&str>) -> Request {
        let mut req = Request::builder().uri(path).body(Body::empty()).unwrap();
        if let Some(value) = authorization {
            req.headers_mut()
                .insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        req
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_extract_token_requires_exact_prefix() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token_from_header(&headers), Err("missing_header"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(
            extract_token_from_header(&headers),
            Ok("abc.def.ghi".to_string())
        );

        for value in ["bearer abc", "BEARER abc", "Basic abc", "Bearerabc"] {
            headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
            assert_eq!(extract_token_from_header(&headers), Err("invalid_scheme"));
        }

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff").unwrap(),
        );
        assert_eq!(extract_token_from_header(&headers), Err("invalid_header"));
    }

    #[tokio::test]
    async fn test_valid_token_attaches_principal() {
        let mut auth_service = MockAuthServicePort::new();
        auth_service
            .expect_authorize()
            .withf(|token| token == "good.token.here")
            .times(1)
            .returning(|_| Ok(AuthenticatedPrincipal::new(alice())));

        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(auth_service, Arc::clone(&hits))
            .oneshot(request("/api/posts", Some("Bearer good.token.here")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "alice");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_or_lowercase_scheme_never_reaches_handler() {
        for authorization in [None, Some("bearer good.token.here")] {
            let mut auth_service = MockAuthServicePort::new();
            auth_service.expect_authorize().never();

            let hits = Arc::new(AtomicUsize::new(0));
            let response = app(auth_service, Arc::clone(&hits))
                .oneshot(request("/api/posts", authorization))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(hits.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_rejections_share_one_body() {
        let mut bodies = Vec::new();

        for error in [
            AuthError::Token(JwtError::Expired),
            AuthError::Token(JwtError::InvalidSignature),
            AuthError::IdentityNotFound("ghost".to_string()),
        ] {
            let mut auth_service = MockAuthServicePort::new();
            auth_service
                .expect_authorize()
                .times(1)
                .returning(move |_| Err(error.clone()));

            let hits = Arc::new(AtomicUsize::new(0));
            let response = app(auth_service, Arc::clone(&hits))
                .oneshot(request("/api/posts", Some("Bearer some.token.value")))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(hits.load(Ordering::SeqCst), 0);
            bodies.push(body_text(response).await);
        }

        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
        assert!(!bodies[0].contains("expired"));
    }

    #[tokio::test]
    async fn test_store_outage_is_503() {
        let mut auth_service = MockAuthServicePort::new();
        auth_service
            .expect_authorize()
            .times(1)
            .returning(|_| Err(AuthError::StoreUnavailable("pool timed out".to_string())));

        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(auth_service, Arc::clone(&hits))
            .oneshot(request("/api/posts", Some("Bearer some.token.value")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exempt_path_skips_authorization() {
        let mut auth_service = MockAuthServicePort::new();
        auth_service.expect_authorize().never();

        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(auth_service, Arc::clone(&hits))
            .oneshot(request("/api/login", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
