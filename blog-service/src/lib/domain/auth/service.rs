use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::IssuedToken;
use auth::PasswordError;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedPrincipal;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Stand-in verified when the username is unknown, so that path costs about
/// as much as a wrong password.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Characters of an unresolved login name kept for logs and errors.
const MAX_LOGGED_USERNAME: usize = 64;

/// Domain service for login, registration and per-request authorization.
///
/// The user repository is the credential store. Password hashing runs on the
/// blocking pool; token checks are pure computation and run inline.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    dummy_hash: Arc<str>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create the service with its injected collaborators.
    ///
    /// # Errors
    /// * `PasswordError` - The hasher cannot produce the decoy digest
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
    ) -> Result<Self, PasswordError> {
        let dummy_hash = authenticator.hash_password(DUMMY_PASSWORD)?;

        Ok(Self {
            repository,
            authenticator,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    async fn burn_verification(&self, password: String) -> Result<(), AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let dummy_hash = Arc::clone(&self.dummy_hash);

        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &dummy_hash))
            .await
            .map(|_| ())
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, AuthError> {
        let Credentials { username, password } = credentials;

        let identity = match Username::new(username.clone()) {
            Ok(valid) => self.repository.find_by_username(&valid).await?,
            Err(_) => None,
        };

        let Some(user) = identity else {
            self.burn_verification(password).await?;
            let username = truncated(&username);
            tracing::warn!(username = %username, reason = "unknown_identity", "Login rejected");
            return Err(AuthError::IdentityNotFound(username.to_string()));
        };

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let subject = user.username.as_str().to_string();

        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &subject)
        })
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?;

        match outcome {
            Ok(issued) => {
                tracing::info!(
                    user_id = %user.id,
                    username = %user.username,
                    expires_at = issued.claims.exp,
                    "Login succeeded"
                );
                Ok(issued)
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(
                    username = %user.username,
                    reason = "invalid_credentials",
                    "Login rejected"
                );
                Err(AuthError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => {
                tracing::error!(error = %e, "Token issuance failed");
                Err(AuthError::Internal(e.to_string()))
            }
        }
    }

    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let CreateUserCommand {
            username,
            email,
            password,
        } = command;

        let authenticator = Arc::clone(&self.authenticator);
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| UserError::Unknown(e.to_string()))??;

        let user = User {
            id: UserId::new(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn authorize(&self, token: &str) -> Result<AuthenticatedPrincipal, AuthError> {
        let claims = self.authenticator.validate_token(token)?;

        let username = Username::new(claims.sub.clone())
            .map_err(|_| AuthError::IdentityNotFound(claims.sub.clone()))?;

        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::IdentityNotFound(claims.sub))?;

        Ok(AuthenticatedPrincipal::new(user))
    }
}

/// Client-supplied name cut to `MAX_LOGGED_USERNAME` characters.
fn truncated(username: &str) -> &str {
    match username.char_indices().nth(MAX_LOGGED_USERNAME) {
        Some((end, _)) => &username[..end],
        None => username,
    }
}
