use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;

use super::session_cookie;
use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use super::SessionResponseData;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CredentialsRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let session = state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok((
        jar.add(session_cookie(&session.token)),
        ApiSuccess::new(StatusCode::CREATED, (&session).into()),
    ))
}

impl CredentialsRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        Ok(RegisterUserCommand::new(username, password))
    }
}
