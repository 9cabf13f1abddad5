use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by a session token.
///
/// Every field is required; a token missing one, or carrying one with the
/// wrong type, fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identity the token was issued to
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `username` valid for `validity` from `now`.
    ///
    /// `None` when the expiry falls outside the representable date range.
    pub fn for_user(
        username: impl Into<String>,
        now: DateTime<Utc>,
        validity: Duration,
    ) -> Option<Self> {
        let expires_at = now.checked_add_signed(validity)?;
        Some(Self {
            username: username.into(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// A token is usable strictly before its expiry second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
