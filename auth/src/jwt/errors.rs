use thiserror::Error;

/// Error type for token issuance and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret is missing or empty")]
    MissingSecret,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token algorithm is not accepted")]
    InvalidAlgorithm,

    #[error("Token is expired")]
    Expired,
}
