use std::fmt;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Username and plaintext password of one login attempt.
///
/// Deliberately unvalidated: a badly shaped username must fail the same way
/// an unknown one does.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity attached to a request that passed the gate.
///
/// Created once per request and stored in the request extensions; handlers
/// receive it with `Extension<AuthenticatedPrincipal>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal {
    pub username: Username,
    pub user: User,
}

impl AuthenticatedPrincipal {
    pub fn new(user: User) -> Self {
        Self {
            username: user.username.clone(),
            user,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}
