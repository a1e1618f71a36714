use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by every token.
///
/// All three claims are mandatory: a payload missing any of them does not
/// deserialize and the token is rejected as malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `subject`, issued at `now` and valid for `ttl`.
    ///
    /// Returns `None` when `now + ttl` falls outside the representable range.
    pub fn for_subject(
        subject: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expires_at = now.checked_add_signed(ttl)?;
        Some(Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself is already outside the validity window.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A freshly minted token together with the claims it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact `header.payload.signature` encoding
    pub token: String,
    pub claims: Claims,
}

impl IssuedToken {
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }
}
