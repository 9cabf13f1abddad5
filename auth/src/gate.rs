use thiserror::Error;

use crate::identity::bind_identity;
use crate::identity::AssertedIdentity;
use crate::identity::IdentityError;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenVerifier;

/// Reason a request was refused by the [`AccessGate`].
///
/// For logging only. Callers must answer every variant with the same response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Denial {
    #[error("no session token presented")]
    MissingToken,

    #[error("session token rejected: {0}")]
    InvalidToken(#[from] JwtError),

    #[error("identity binding failed: {0}")]
    Identity(#[from] IdentityError),
}

/// Authentication and authorization check run in front of protected operations.
///
/// A request moves through `Unauthenticated -> TokenPresented -> TokenVerified
/// -> IdentityBound` and is authorized only if every step holds; the first
/// failing step ends evaluation with a [`Denial`]. The gate keeps no state
/// between requests.
pub struct AccessGate<'a> {
    verifier: &'a TokenVerifier,
}

impl<'a> AccessGate<'a> {
    pub fn new(verifier: &'a TokenVerifier) -> Self {
        Self { verifier }
    }

    /// Evaluate one request.
    ///
    /// # Arguments
    /// * `token` - Session token from the credential carrier, if any
    /// * `payload` - Raw request body holding the asserted identity
    ///
    /// # Returns
    /// The verified claims, unchanged, when the request is authorized
    pub fn admit(&self, token: Option<&str>, payload: &[u8]) -> Result<Claims, Denial> {
        let token = token
            .filter(|token| !token.is_empty())
            .ok_or(Denial::MissingToken)?;

        let claims = self.verifier.verify(token)?;

        let asserted = AssertedIdentity::from_payload(payload);
        bind_identity(&claims, asserted.username())?;

        Ok(claims)
    }
}
