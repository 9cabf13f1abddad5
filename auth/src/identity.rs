use serde_json::Value;
use thiserror::Error;

use crate::jwt::Claims;

/// Why a verified identity could not be bound to a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Request does not assert an identity")]
    Missing,

    #[error("Asserted identity does not match the token")]
    Mismatch,
}

/// The identity a request payload claims to act as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssertedIdentity {
    username: Option<String>,
}

impl AssertedIdentity {
    /// Read the `username` field of a JSON object payload.
    ///
    /// Anything else in the payload is ignored. An empty, non-JSON or
    /// non-object payload, or a `username` that is not a string, asserts
    /// nothing.
    pub fn from_payload(payload: &[u8]) -> Self {
        let username = serde_json::from_slice::<Value>(payload)
            .ok()
            .and_then(|value| value.get("username")?.as_str().map(str::to_string));

        Self { username }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

/// Bind the token's identity to the identity the request asserts.
///
/// Succeeds only on exact equality and returns the bound username.
pub fn bind_identity<'a>(
    verified: &'a Claims,
    asserted: Option<&str>,
) -> Result<&'a str, IdentityError> {
    match asserted {
        None => Err(IdentityError::Missing),
        Some(username) if username == verified.username => Ok(&verified.username),
        Some(_) => Err(IdentityError::Mismatch),
    }
}
