use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;

use super::session_cookie;
use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use super::SessionResponseData;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CredentialsRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    // A name that could never have been registered fails like any other.
    let username = Username::new(body.username).map_err(|_| ApiError::Unauthorized)?;

    let session = state
        .user_service
        .authenticate(&username, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok((
        jar.add(session_cookie(&session.token)),
        ApiSuccess::new(StatusCode::OK, (&session).into()),
    ))
}
