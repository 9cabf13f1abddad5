use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::gate::AccessGate;
use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Issuer and verifier share one secret and one clock, both supplied at
/// construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator using the wall clock.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_validity` - Lifetime of every issued token
    ///
    /// # Errors
    /// * `MissingSecret` - `jwt_secret` is empty
    pub fn new(jwt_secret: &[u8], token_validity: Duration) -> Result<Self, JwtError> {
        Self::with_clock(jwt_secret, token_validity, Arc::new(SystemClock))
    }

    /// Create a new authenticator reading time from `clock`.
    ///
    /// # Errors
    /// * `MissingSecret` - `jwt_secret` is empty
    pub fn with_clock(
        jwt_secret: &[u8],
        token_validity: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::with_clock(jwt_secret, token_validity, Arc::clone(&clock))?,
            verifier: TokenVerifier::with_clock(jwt_secret, clock)?,
        })
    }

    /// Replace the default password hasher, e.g. one with tuned cost.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    pub fn token_validity(&self) -> Duration {
        self.issuer.validity()
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `username`.
    ///
    /// # Arguments
    /// * `username` - Identity the token is issued to
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password digest
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match, or digest is unusable
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
        stored_hash: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(stored_hash, password) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issuer.issue(username)?)
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, where the password was just hashed.
    ///
    /// # Errors
    /// * `JwtError` - Token signing failed
    pub fn issue_token(&self, username: &str) -> Result<IssuedToken, JwtError> {
        self.issuer.issue(username)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token malformed, forged, wrong algorithm or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.verifier.verify(token)
    }

    /// Access gate backed by this authenticator's verifier.
    pub fn gate(&self) -> AccessGate<'_> {
        AccessGate::new(&self.verifier)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::clock::ManualClock;
    use crate::password::PasswordHashParams;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(SECRET, Duration::hours(24))
            .expect("Failed to create authenticator")
            .with_password_hasher(
                PasswordHasher::with_params(PasswordHashParams {
                    memory_kib: 1024,
                    iterations: 1,
                    parallelism: 1,
                })
                .unwrap(),
            )
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("secret1")
            .expect("Failed to hash password");

        let issued = authenticator
            .authenticate("alice", "secret1", &hash)
            .expect("Authentication failed");
        assert!(!issued.access_token.is_empty());

        let decoded = authenticator
            .validate_token(&issued.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.username, "alice");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("secret1")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("alice", "wrong_password", &hash);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_unusable_digest() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("alice", "secret1", "not-a-digest");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = authenticator();

        let issued = authenticator
            .issue_token("alice")
            .expect("Failed to issue token");
        let decoded = authenticator
            .validate_token(&issued.access_token)
            .expect("Failed to validate token");

        assert_eq!(decoded, issued.claims);
        assert_eq!(authenticator.token_validity(), Duration::hours(24));
    }

    #[test]
    fn test_shared_clock_drives_expiry() {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let authenticator = Authenticator::with_clock(SECRET, Duration::hours(1), clock.clone())
            .expect("Failed to create authenticator");

        let issued = authenticator.issue_token("alice").unwrap();
        clock.advance(Duration::hours(2));

        assert!(matches!(
            authenticator.validate_token(&issued.access_token),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_missing_secret() {
        assert!(matches!(
            Authenticator::new(b"", Duration::hours(24)),
            Err(JwtError::MissingSecret)
        ));
    }
}
