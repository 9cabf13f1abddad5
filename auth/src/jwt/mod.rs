pub mod claims;
pub mod errors;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use errors::JwtError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::TOKEN_ALGORITHM;
pub use verifier::TokenVerifier;
