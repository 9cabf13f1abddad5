use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::transaction::models::Category;
use crate::domain::transaction::models::Transaction;
use crate::domain::transaction::ports::TransactionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TransactionResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::transaction::errors::TransactionError;

pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<TransactionResponseData>>, ApiError> {
    state
        .transaction_service
        .list_transactions(&caller.username)
        .await
        .map_err(ApiError::from)
        .map(|transactions| ApiSuccess::new(StatusCode::OK, to_response_data(&transactions)))
}

pub async fn list_transactions_by_category(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(category): Path<String>,
) -> Result<ApiSuccess<Vec<TransactionResponseData>>, ApiError> {
    let category = Category::new(category).map_err(TransactionError::from)?;

    state
        .transaction_service
        .list_transactions_by_category(&caller.username, &category)
        .await
        .map_err(ApiError::from)
        .map(|transactions| ApiSuccess::new(StatusCode::OK, to_response_data(&transactions)))
}

fn to_response_data(transactions: &[Transaction]) -> Vec<TransactionResponseData> {
    transactions.iter().map(TransactionResponseData::from).collect()
}
