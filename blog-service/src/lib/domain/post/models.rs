use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::post::errors::PostContentError;
use crate::domain::post::errors::PostIdError;
use crate::domain::post::errors::PostTitleError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Blog post aggregate.
///
/// The author's username is copied in at creation so listings need no user
/// lookup.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub content: PostContent,
    pub author: PostAuthor,
    pub created_at: DateTime<Utc>,
}

/// Post unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Generate a new random post ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a post ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(PostId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post title, 5-100 characters once surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 100;

    pub fn new(title: String) -> Result<Self, PostTitleError> {
        let title = title.trim().to_string();
        let length = title.chars().count();

        if length == 0 {
            Err(PostTitleError::Blank)
        } else if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            Err(PostTitleError::Length {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post body, at least 10 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    const MIN_LENGTH: usize = 10;

    pub fn new(content: String) -> Result<Self, PostContentError> {
        let length = content.trim().chars().count();

        if length == 0 {
            Err(PostContentError::Blank)
        } else if length < Self::MIN_LENGTH {
            Err(PostContentError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(content))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Who wrote a post or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAuthor {
    pub id: UserId,
    pub username: Username,
}

impl From<&User> for PostAuthor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Command to create a post; the author comes from the authenticated request.
#[derive(Debug)]
pub struct CreatePostCommand {
    pub title: PostTitle,
    pub content: PostContent,
}

/// Full replacement of a post's editable fields.
#[derive(Debug)]
pub struct UpdatePostCommand {
    pub title: PostTitle,
    pub content: PostContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_validation() {
        assert_eq!(
            PostTitle::new("  Hello world  ".to_string()).unwrap().as_str(),
            "Hello world"
        );
        assert_eq!(PostTitle::new("   ".to_string()), Err(PostTitleError::Blank));
        assert_eq!(
            PostTitle::new("Hey".to_string()),
            Err(PostTitleError::Length {
                min: 5,
                max: 100,
                actual: 3
            })
        );
        assert!(PostTitle::new("x".repeat(101)).is_err());
        assert!(PostTitle::new("x".repeat(100)).is_ok());
    }

    #[test]
    fn test_content_validation() {
        assert!(PostContent::new("Long enough body".to_string()).is_ok());
        assert_eq!(PostContent::new(String::new()), Err(PostContentError::Blank));
        assert_eq!(
            PostContent::new("too short".to_string()),
            Err(PostContentError::TooShort { min: 10, actual: 9 })
        );
    }

    #[test]
    fn test_post_id_parsing() {
        let id = PostId::new();
        assert_eq!(PostId::from_string(&id.to_string()), Ok(id));
        assert!(PostId::from_string("not-a-uuid").is_err());
    }
}
