use async_trait::async_trait;
use auth::IssuedToken;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedPrincipal;
use crate::domain::auth::models::Credentials;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Authentication operations exposed to the HTTP layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and mint a token.
    ///
    /// # Errors
    /// * `IdentityNotFound` - No user with this username
    /// * `InvalidCredentials` - Password does not match
    /// * `StoreUnavailable` - Credential store could not be reached
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, AuthError>;

    /// Hash the password and persist a new identity.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Conflict with an existing user
    /// * `Password` - Hashing failed
    /// * `Repository` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Validate a bearer token and resolve its subject.
    ///
    /// Performs exactly one credential store lookup, and none at all when the
    /// token itself is invalid.
    ///
    /// # Errors
    /// * `Token` - Malformed, wrongly signed, or expired token
    /// * `IdentityNotFound` - Subject no longer exists
    /// * `StoreUnavailable` - Credential store could not be reached
    async fn authorize(&self, token: &str) -> Result<AuthenticatedPrincipal, AuthError>;
}
