use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::transaction::models::Category;
use crate::domain::transaction::models::CreateTransactionCommand;
use crate::domain::transaction::models::Currency;
use crate::domain::transaction::models::TransactionName;
use crate::domain::transaction::ports::TransactionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TransactionResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::transaction::errors::TransactionError;

pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(category): Path<String>,
    Json(body): Json<CreateTransactionRequest>,
) -> Result<ApiSuccess<TransactionResponseData>, ApiError> {
    let command = body.try_into_command(category)?;

    state
        .transaction_service
        .create_transaction(&caller.username, command)
        .await
        .map_err(ApiError::from)
        .map(|ref transaction| ApiSuccess::new(StatusCode::CREATED, transaction.into()))
}

/// HTTP request body for recording a transaction (raw JSON).
///
/// The `username` field is consumed by the access gate before this is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTransactionRequest {
    name: String,
    value: i64,
    currency: String,
}

impl CreateTransactionRequest {
    fn try_into_command(self, category: String) -> Result<CreateTransactionCommand, TransactionError> {
        let name = TransactionName::new(self.name)?;
        let currency = Currency::new(self.currency)?;
        let category = Category::new(category)?;
        Ok(CreateTransactionCommand::new(name, self.value, currency, category))
    }
}
