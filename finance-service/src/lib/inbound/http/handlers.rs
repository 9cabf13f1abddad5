use auth::IssuedToken;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::transaction::models::Transaction;
use crate::domain::user::models::Session;
use crate::transaction::errors::TransactionError;
use crate::user::errors::UserError;

pub mod login;
pub mod register;
pub mod transactions;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "jwtToken";

const PERMISSION_DENIED: &str = "permission denied";
const INVALID_CREDENTIALS: &str = "invalid credentials";
const INTERNAL_SERVER_ERROR: &str = "internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Failure answered to a client.
///
/// `InternalServerError` detail is logged, never sent. `Forbidden` carries no
/// reason so every access-gate denial produces the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized,
    Forbidden,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR.to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, PERMISSION_DENIED.to_string()),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(username) => {
                ApiError::Conflict(format!("username already exists: {}", username))
            }
            UserError::InvalidCredentials => ApiError::Unauthorized,
            UserError::InvalidUsername(_) | UserError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TransactionError::InvalidTransactionId(_)
            | TransactionError::InvalidCategory(_)
            | TransactionError::InvalidName(_)
            | TransactionError::InvalidCurrency(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            TransactionError::DatabaseError(_) | TransactionError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Username and password as posted to `/user` and `/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub username: String,
    pub token: String,
}

impl From<&Session> for SessionResponseData {
    fn from(session: &Session) -> Self {
        Self {
            username: session.user.username.as_str().to_string(),
            token: session.token.access_token.clone(),
        }
    }
}

/// Cookie handing the session token to the browser.
///
/// Expires together with the token. Not marked `Secure`; TLS is terminated
/// in front of the service.
pub fn session_cookie(token: &IssuedToken) -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, token.access_token.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/");

    if let Ok(expires) = OffsetDateTime::from_unix_timestamp(token.claims.exp) {
        cookie = cookie.expires(expires);
    }

    cookie.build()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionResponseData {
    pub id: String,
    pub username: String,
    pub name: String,
    pub value: i64,
    pub currency: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionResponseData {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id.to_string(),
            username: transaction.username.as_str().to_string(),
            name: transaction.name.as_str().to_string(),
            value: transaction.value,
            currency: transaction.currency.as_str().to_string(),
            category: transaction.category.as_str().to_string(),
            created_at: transaction.created_at,
        }
    }
}
