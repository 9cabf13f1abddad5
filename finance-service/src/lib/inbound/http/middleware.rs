use auth::Denial;
use axum::body::Body;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::SESSION_COOKIE;
use crate::inbound::http::router::AppState;

/// Largest request body the access gate will buffer to find the asserted identity.
pub const MAX_GATED_BODY_BYTES: usize = 64 * 1024;

/// Extension type holding the identity the access gate bound to the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: Username,
}

/// Middleware admitting a request only when its session cookie carries a valid
/// token issued to the `username` its JSON body asserts.
///
/// A request without a session cookie is refused before its body is read.
/// Otherwise the body is buffered, inspected and handed on unchanged. Every denial is
/// answered with the same 403; the reason goes to the log.
pub async fn access_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|token| !token.is_empty())
    else {
        tracing::warn!(
            reason = %Denial::MissingToken,
            method = %req.method(),
            uri = %req.uri(),
            "Access denied"
        );
        return Err(ApiError::Forbidden);
    };

    let (parts, body) = req.into_parts();

    let bytes = axum::body::to_bytes(body, MAX_GATED_BODY_BYTES)
        .await
        .map_err(|e| {
            tracing::warn!(
                reason = %e,
                method = %parts.method,
                uri = %parts.uri,
                "Access denied: unreadable body"
            );
            ApiError::Forbidden
        })?;

    let claims = state
        .authenticator
        .gate()
        .admit(Some(token), &bytes)
        .map_err(|denial| {
            tracing::warn!(
                reason = %denial,
                method = %parts.method,
                uri = %parts.uri,
                "Access denied"
            );
            ApiError::Forbidden
        })?;

    let username = Username::new(claims.username).map_err(|e| {
        tracing::warn!(reason = %e, "Access denied: token names an invalid username");
        ApiError::Forbidden
    })?;

    tracing::debug!(username = %username, uri = %parts.uri, "Access granted");

    let mut req = Request::from_parts(parts, Body::from(bytes));
    req.extensions_mut().insert(AuthenticatedUser { username });

    Ok(next.run(req).await)
}
