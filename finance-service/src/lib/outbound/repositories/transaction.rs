use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::transaction::models::Category;
use crate::domain::transaction::models::Currency;
use crate::domain::transaction::models::Transaction;
use crate::domain::transaction::models::TransactionId;
use crate::domain::transaction::models::TransactionName;
use crate::domain::transaction::ports::TransactionRepository;
use crate::domain::user::models::Username;
use crate::transaction::errors::TransactionError;

pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn transaction_from_row(row: &PgRow) -> Result<Transaction, TransactionError> {
    Ok(Transaction {
        id: TransactionId(row.get("id")),
        username: Username::new(row.get("username"))
            .map_err(|e| TransactionError::DatabaseError(e.to_string()))?,
        name: TransactionName::new(row.get("name"))?,
        value: row.get("value"),
        currency: Currency::new(row.get("currency"))?,
        category: Category::new(row.get("category"))?,
        created_at: row.get("created_at"),
    })
}

fn database_error(e: sqlx::Error) -> TransactionError {
    TransactionError::DatabaseError(e.to_string())
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn create(&self, transaction: Transaction) -> Result<Transaction, TransactionError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, username, name, value, currency, category, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(transaction.id.as_uuid())
        .bind(transaction.username.as_str())
        .bind(transaction.name.as_str())
        .bind(transaction.value)
        .bind(transaction.currency.as_str())
        .bind(transaction.category.as_str())
        .bind(transaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(transaction)
    }

    async fn find_by_owner(&self, owner: &Username) -> Result<Vec<Transaction>, TransactionError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, name, value, currency, category, created_at
            FROM transactions
            WHERE username = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(transaction_from_row).collect()
    }

    async fn find_by_owner_and_category(
        &self,
        owner: &Username,
        category: &Category,
    ) -> Result<Vec<Transaction>, TransactionError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, name, value, currency, category, created_at
            FROM transactions
            WHERE username = $1 AND category = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.as_str())
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(transaction_from_row).collect()
    }

    async fn find_by_id(
        &self,
        owner: &Username,
        id: TransactionId,
    ) -> Result<Option<Transaction>, TransactionError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, name, value, currency, category, created_at
            FROM transactions
            WHERE id = $1 AND username = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(transaction_from_row).transpose()
    }

    async fn delete(&self, owner: &Username, id: TransactionId) -> Result<(), TransactionError> {
        let result = sqlx::query(
            r#"
            DELETE FROM transactions
            WHERE id = $1 AND username = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TransactionError::NotFound(id));
        }

        Ok(())
    }
}
