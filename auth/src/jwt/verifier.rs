use std::sync::Arc;

use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::issuer::TOKEN_ALGORITHM;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Checks signature, algorithm and expiry of presented session tokens.
///
/// Only HS256 is accepted. Expiry is evaluated against the injected clock with
/// no leeway instead of jsonwebtoken's built-in wall clock check.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    /// # Errors
    /// * `MissingSecret` - `secret` is empty
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    /// # Errors
    /// * `MissingSecret` - `secret` is empty
    pub fn with_clock(secret: &[u8], clock: Arc<dyn Clock>) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
        })
    }

    /// Decode and validate a token, returning its claims.
    ///
    /// # Errors
    /// * `Malformed` - Not a JWT, or claims missing/mistyped
    /// * `InvalidSignature` - Signed with a different secret
    /// * `InvalidAlgorithm` - Header names any algorithm but HS256
    /// * `Expired` - Current time is at or past `exp`
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
                    JwtError::InvalidAlgorithm
                }
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        if token_data
            .claims
            .is_expired(self.clock.now().timestamp())
        {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims)
    }
}
