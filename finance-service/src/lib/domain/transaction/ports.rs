use async_trait::async_trait;

use super::models::Category;
use super::models::CreateTransactionCommand;
use super::models::Transaction;
use super::models::TransactionId;
use crate::domain::transaction::errors::TransactionError;
use crate::domain::user::models::Username;

/// Port for transaction domain service operations.
///
/// Every operation is scoped to `owner`, the identity bound by the access
/// gate; transactions of other users are invisible.
#[async_trait]
pub trait TransactionServicePort: Send + Sync + 'static {
    /// Record a new transaction for `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_transaction(
        &self,
        owner: &Username,
        command: CreateTransactionCommand,
    ) -> Result<Transaction, TransactionError>;

    /// List all of `owner`'s transactions, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_transactions(&self, owner: &Username)
        -> Result<Vec<Transaction>, TransactionError>;

    /// List `owner`'s transactions in one category, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_transactions_by_category(
        &self,
        owner: &Username,
        category: &Category,
    ) -> Result<Vec<Transaction>, TransactionError>;

    /// Retrieve one of `owner`'s transactions.
    ///
    /// # Errors
    /// * `NotFound` - No such transaction for this owner in this category
    /// * `DatabaseError` - Database operation failed
    async fn get_transaction(
        &self,
        owner: &Username,
        category: &Category,
        id: TransactionId,
    ) -> Result<Transaction, TransactionError>;

    /// Delete one of `owner`'s transactions.
    ///
    /// # Errors
    /// * `NotFound` - No such transaction for this owner in this category
    /// * `DatabaseError` - Database operation failed
    async fn delete_transaction(
        &self,
        owner: &Username,
        category: &Category,
        id: TransactionId,
    ) -> Result<(), TransactionError>;
}

/// Repository port for transaction persistence operations.
#[async_trait]
pub trait TransactionRepository: Send + Sync + 'static {
    /// Persist a new transaction.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, transaction: Transaction) -> Result<Transaction, TransactionError>;

    /// All transactions owned by `owner`, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_owner(&self, owner: &Username) -> Result<Vec<Transaction>, TransactionError>;

    /// Transactions owned by `owner` in `category`, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_owner_and_category(
        &self,
        owner: &Username,
        category: &Category,
    ) -> Result<Vec<Transaction>, TransactionError>;

    /// Transaction `id` if it exists and belongs to `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(
        &self,
        owner: &Username,
        id: TransactionId,
    ) -> Result<Option<Transaction>, TransactionError>;

    /// Remove transaction `id` belonging to `owner`.
    ///
    /// # Errors
    /// * `NotFound` - No such transaction for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, owner: &Username, id: TransactionId) -> Result<(), TransactionError>;
}
