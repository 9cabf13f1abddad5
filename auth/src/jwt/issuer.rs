use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Signing algorithm for every session token. Verification accepts nothing else.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// A freshly signed session token together with the claims inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub claims: Claims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.expires_at()
    }
}

/// Mints signed, time-bounded identity assertions.
///
/// Holds only the signing key, the validity window and a clock; issuing is a
/// pure function of those and the username, safe to call concurrently.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    validity: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create an issuer signing with `secret` and the wall clock.
    ///
    /// # Errors
    /// * `MissingSecret` - `secret` is empty
    pub fn new(secret: &[u8], validity: Duration) -> Result<Self, JwtError> {
        Self::with_clock(secret, validity, Arc::new(SystemClock))
    }

    /// Create an issuer reading time from `clock`.
    ///
    /// # Errors
    /// * `MissingSecret` - `secret` is empty
    pub fn with_clock(
        secret: &[u8],
        validity: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            validity,
            clock,
        })
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Sign a claim set for `username` expiring one validity window from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Expiry out of range, or claims could not be signed
    pub fn issue(&self, username: &str) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_user(username, self.clock.now(), self.validity).ok_or_else(
            || JwtError::SigningFailed(format!("validity {} overflows expiry", self.validity)),
        )?;
        let access_token = encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            claims,
        })
    }
}
