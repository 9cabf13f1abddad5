//! In-process adapters for the repository ports.
//!
//! Used by the integration tests and handy for local runs without
//! PostgreSQL. State lives for as long as the repository value.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::transaction::errors::TransactionError;
use crate::domain::transaction::models::Category;
use crate::domain::transaction::models::Transaction;
use crate::domain::transaction::models::TransactionId;
use crate::domain::transaction::ports::TransactionRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Username, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: User) -> Result<User, UserError> {
        // Check and insert under one write lock.
        match self.users.write().await.entry(user.username.clone()) {
            Entry::Occupied(entry) => Err(UserError::UsernameAlreadyExists(entry.key().to_string())),
            Entry::Vacant(entry) => Ok(entry.insert(user).clone()),
        }
    }

    async fn get_user(&self, username: &Username) -> Result<User, UserError> {
        self.users
            .read()
            .await
            .get(username)
            .cloned()
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<RwLock<HashMap<TransactionId, Transaction>>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select<F>(&self, predicate: F) -> Vec<Transaction>
    where
        F: Fn(&Transaction) -> bool,
    {
        let mut selected: Vec<Transaction> = self
            .transactions
            .read()
            .await
            .values()
            .filter(|t| predicate(t))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        selected
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn create(&self, transaction: Transaction) -> Result<Transaction, TransactionError> {
        self.transactions
            .write()
            .await
            .insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn find_by_owner(&self, owner: &Username) -> Result<Vec<Transaction>, TransactionError> {
        Ok(self.select(|t| &t.username == owner).await)
    }

    async fn find_by_owner_and_category(
        &self,
        owner: &Username,
        category: &Category,
    ) -> Result<Vec<Transaction>, TransactionError> {
        Ok(self
            .select(|t| &t.username == owner && &t.category == category)
            .await)
    }

    async fn find_by_id(
        &self,
        owner: &Username,
        id: TransactionId,
    ) -> Result<Option<Transaction>, TransactionError> {
        Ok(self
            .transactions
            .read()
            .await
            .get(&id)
            .filter(|t| &t.username == owner)
            .cloned())
    }

    async fn delete(&self, owner: &Username, id: TransactionId) -> Result<(), TransactionError> {
        let mut transactions = self.transactions.write().await;
        let owned = transactions
            .get(&id)
            .is_some_and(|t| &t.username == owner);
        if !owned {
            return Err(TransactionError::NotFound(id));
        }
        transactions.remove(&id);
        Ok(())
    }
}
