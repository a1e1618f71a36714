#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::HashCost;
use auth::JwtCodec;
use auth::ManualClock;
use auth::PasswordHasher;
use blog_service::inbound::http::policy::AccessPolicy;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::router::AppState;
use blog_service::outbound::repositories::InMemoryStore;
use chrono::DateTime;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_TTL_MINUTES: i64 = 30;

/// Test application that spawns a real server over the in-memory store.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    /// Clock the token codec reads; advance it to expire tokens.
    pub clock: Arc<ManualClock>,
    pub codec: Arc<JwtCodec>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let codec = Arc::new(JwtCodec::with_clock(
            TEST_SECRET,
            Duration::minutes(TOKEN_TTL_MINUTES),
            clock.clone(),
        ));

        // Cheap hashing keeps the suite fast in debug builds
        let hasher = PasswordHasher::with_cost(HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");
        let authenticator = Arc::new(Authenticator::new(hasher, Arc::clone(&codec)));

        let store = Arc::new(InMemoryStore::new());
        let state = AppState::from_repositories(
            Arc::clone(&store),
            Arc::clone(&store),
            store,
            authenticator,
        )
        .expect("Failed to build application state");

        let router = create_router(state, AccessPolicy::new(["/api/login", "/api/register"]));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            clock,
            codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body's `data`.
    pub async fn register(&self, username: &str, password: &str) -> Value {
        let response = self
            .post("/api/register")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the issued token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("token missing from login response")
            .to_string()
    }

    /// Register then log in, returning `(user id, token)`.
    pub async fn signed_in(&self, username: &str) -> (String, String) {
        let user = self.register(username, "Secr3t!").await;
        let token = self.login(username, "Secr3t!").await;
        (user["id"].as_str().unwrap().to_string(), token)
    }
}
