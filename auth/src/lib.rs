//! Authentication and authorization library
//!
//! Provides the credential and session machinery shared by the finance service:
//! - Password hashing (Argon2id, cost tunable)
//! - Session token issuance and verification (HS256 JWT, typed claims)
//! - Identity binding between a verified token and a request payload
//! - Access gate composing the two in front of protected operations
//!
//! Secrets and clocks are passed in explicitly; nothing here reads the
//! process environment.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password"));
//! assert!(!hasher.verify(&hash, "not_my_password"));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenIssuer, TokenVerifier};
//! use chrono::Duration;
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret, Duration::hours(24)).unwrap();
//! let verifier = TokenVerifier::new(secret).unwrap();
//!
//! let issued = issuer.issue("alice").unwrap();
//! let claims = verifier.verify(&issued.access_token).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```
//!
//! ## Complete Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let issued = auth.authenticate("alice", "password123", &hash).unwrap();
//!
//! // Protected call: token must belong to the identity the payload asserts
//! let claims = auth
//!     .gate()
//!     .admit(Some(&issued.access_token), br#"{"username":"alice"}"#)
//!     .unwrap();
//! assert_eq!(claims.username, "alice");
//! assert!(auth
//!     .gate()
//!     .admit(Some(&issued.access_token), br#"{"username":"bob"}"#)
//!     .is_err());
//! ```

pub mod authenticator;
pub mod clock;
pub mod gate;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use gate::AccessGate;
pub use gate::Denial;
pub use identity::bind_identity;
pub use identity::AssertedIdentity;
pub use identity::IdentityError;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHashParams;
pub use password::PasswordHasher;
