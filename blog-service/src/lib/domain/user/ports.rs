use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
///
/// Registration is not here: it belongs to the authentication service, which
/// owns password hashing.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve all users, newest first.
    ///
    /// # Errors
    /// * `Repository` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Repository` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// Tokens already issued to the user stop working on their next request,
    /// because the gate re-resolves the subject every time.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Repository` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
///
/// Also serves as the credential store for authentication through
/// `find_by_username`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Repository` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<User>, RepositoryError>;

    /// Retrieve all users from storage, newest first.
    async fn list_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// Remove user from storage, together with their posts and comments.
    ///
    /// # Returns
    /// `true` if a user was deleted, `false` if none had this id
    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError>;
}
