use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::TransactionError;
use super::models::Category;
use super::models::CreateTransactionCommand;
use super::models::Transaction;
use super::models::TransactionId;
use super::ports::TransactionRepository;
use super::ports::TransactionServicePort;
use crate::domain::user::models::Username;

/// Domain service implementation for transaction operations.
pub struct TransactionService<TR>
where
    TR: TransactionRepository,
{
    repository: Arc<TR>,
}

impl<TR> TransactionService<TR>
where
    TR: TransactionRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TransactionServicePort for TransactionService<TR>
where
    TR: TransactionRepository,
{
    async fn create_transaction(
        &self,
        owner: &Username,
        command: CreateTransactionCommand,
    ) -> Result<Transaction, TransactionError> {
        let transaction = Transaction {
            id: TransactionId::new(),
            username: owner.clone(),
            name: command.name,
            value: command.value,
            currency: command.currency,
            category: command.category,
            created_at: Utc::now(),
        };

        let created = self.repository.create(transaction).await?;

        tracing::debug!(
            username = %owner,
            transaction_id = %created.id,
            category = %created.category,
            "Transaction recorded"
        );

        Ok(created)
    }

    async fn list_transactions(
        &self,
        owner: &Username,
    ) -> Result<Vec<Transaction>, TransactionError> {
        self.repository.find_by_owner(owner).await
    }

    async fn list_transactions_by_category(
        &self,
        owner: &Username,
        category: &Category,
    ) -> Result<Vec<Transaction>, TransactionError> {
        self.repository
            .find_by_owner_and_category(owner, category)
            .await
    }

    async fn get_transaction(
        &self,
        owner: &Username,
        category: &Category,
        id: TransactionId,
    ) -> Result<Transaction, TransactionError> {
        self.repository
            .find_by_id(owner, id)
            .await?
            .filter(|transaction| &transaction.category == category)
            .ok_or(TransactionError::NotFound(id))
    }

    async fn delete_transaction(
        &self,
        owner: &Username,
        category: &Category,
        id: TransactionId,
    ) -> Result<(), TransactionError> {
        let transaction = self.get_transaction(owner, category, id).await?;
        self.repository.delete(owner, transaction.id).await?;

        tracing::debug!(username = %owner, transaction_id = %id, "Transaction deleted");

        Ok(())
    }
}
