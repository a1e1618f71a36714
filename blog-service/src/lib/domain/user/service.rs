use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        Ok(self.repository.list_all().await?)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id.to_string()));
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
