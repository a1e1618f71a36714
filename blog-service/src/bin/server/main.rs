use std::sync::Arc;

use auth::Authenticator;
use auth::JwtCodec;
use auth::PasswordHasher;
use blog_service::config::Config;
use blog_service::inbound::http::policy::AccessPolicy;
use blog_service::inbound::http::router::create_router;
use blog_service::inbound::http::router::AppState;
use blog_service::outbound::repositories::InMemoryStore;
use blog_service::outbound::repositories::PostgresCommentRepository;
use blog_service::outbound::repositories::PostgresPostRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let database = match config.database.url {
        Some(_) => "postgresql",
        None => "memory",
    };

    tracing::info!(
        http_port = config.server.http_port,
        database,
        token_ttl_minutes = config.jwt.expiration_minutes,
        public_paths = ?config.security.public_paths,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_cost(config.password.hash_cost())?;
    let jwt_codec = Arc::new(JwtCodec::new(
        config.jwt.secret.as_bytes(),
        Duration::minutes(config.jwt.expiration_minutes),
    ));
    let authenticator = Arc::new(Authenticator::new(password_hasher, jwt_codec));

    let state = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            AppState::from_repositories(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresPostRepository::new(pg_pool.clone())),
                Arc::new(PostgresCommentRepository::new(pg_pool)),
                authenticator,
            )?
        }
        None => {
            tracing::warn!("No database.url configured, data lives in memory only");
            let store = Arc::new(InMemoryStore::new());
            AppState::from_repositories(
                Arc::clone(&store),
                Arc::clone(&store),
                store,
                authenticator,
            )?
        }
    };

    let policy = AccessPolicy::new(config.security.public_paths.iter().cloned());

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state, policy)).await?;

    tracing::info!("Server exited");
    Ok(())
}
