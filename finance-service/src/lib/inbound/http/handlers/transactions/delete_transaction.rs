use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::domain::transaction::models::Category;
use crate::domain::transaction::models::TransactionId;
use crate::domain::transaction::ports::TransactionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::transaction::errors::TransactionError;

pub async fn delete_transaction(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((category, transaction_id)): Path<(String, String)>,
) -> Result<ApiSuccess<DeleteTransactionResponseData>, ApiError> {
    let category = Category::new(category).map_err(TransactionError::from)?;
    let transaction_id =
        TransactionId::from_string(&transaction_id).map_err(TransactionError::from)?;

    state
        .transaction_service
        .delete_transaction(&caller.username, &category, transaction_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteTransactionResponseData {
                    id: transaction_id.to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteTransactionResponseData {
    pub id: String,
}
