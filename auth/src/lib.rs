//! Authentication utilities library
//!
//! Storage-agnostic building blocks for stateless bearer-token authentication:
//! - Password hashing (Argon2id, configurable work factor)
//! - JWT issuance and validation (HS256, clock-driven expiry)
//! - Authentication coordination
//!
//! Services define their own identity lookup and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtCodec;
//! use chrono::Duration;
//!
//! let codec = JwtCodec::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30));
//! let issued = codec.issue("alice").unwrap();
//! assert_eq!(codec.extract_subject(&issued.token).unwrap(), "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, JwtCodec, PasswordHasher};
//! use chrono::Duration;
//!
//! let codec = Arc::new(JwtCodec::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(30),
//! ));
//! let auth = Authenticator::new(PasswordHasher::new(), codec);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let issued = auth.authenticate("password123", &hash, "alice").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtCodec;
pub use jwt::JwtError;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
