use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::transaction::errors::CategoryError;
use crate::transaction::errors::CurrencyError;
use crate::transaction::errors::TransactionIdError;
use crate::transaction::errors::TransactionNameError;
use crate::user::models::Username;

/// A recorded movement of money owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub username: Username,
    pub name: TransactionName,
    /// Amount in minor currency units; negative for spending
    pub value: i64,
    pub currency: Currency,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

/// Transaction unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(pub Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a transaction ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TransactionIdError> {
        Uuid::parse_str(s)
            .map(TransactionId)
            .map_err(|e| TransactionIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Grouping label for transactions, taken from the request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    const MAX_LENGTH: usize = 50;

    pub fn new(category: String) -> Result<Self, CategoryError> {
        let length = category.chars().count();
        if category.trim().is_empty() {
            Err(CategoryError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(CategoryError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(category))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free text description of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionName(String);

impl TransactionName {
    const MAX_LENGTH: usize = 50;

    pub fn new(name: String) -> Result<Self, TransactionNameError> {
        let length = name.chars().count();
        if name.trim().is_empty() {
            Err(TransactionNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TransactionNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Three letter currency code, stored uppercase.
///
/// Only the shape is checked; no list of known currencies is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: String) -> Result<Self, CurrencyError> {
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(CurrencyError::InvalidCode(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to record a new transaction with validated fields
#[derive(Debug)]
pub struct CreateTransactionCommand {
    pub name: TransactionName,
    pub value: i64,
    pub currency: Currency,
    pub category: Category,
}

impl CreateTransactionCommand {
    pub fn new(name: TransactionName, value: i64, currency: Currency, category: Category) -> Self {
        Self {
            name,
            value,
            currency,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_id_round_trips_through_string() {
        let id = TransactionId::new();
        assert_eq!(TransactionId::from_string(&id.to_string()), Ok(id));
        assert!(TransactionId::from_string("42").is_err());
    }

    #[test]
    fn test_category_validation() {
        assert!(Category::new("groceries".to_string()).is_ok());
        assert_eq!(Category::new(String::new()), Err(CategoryError::Empty));
        assert_eq!(Category::new("   ".to_string()), Err(CategoryError::Empty));
        assert!(matches!(
            Category::new("c".repeat(51)),
            Err(CategoryError::TooLong { max: 50, .. })
        ));
    }

    #[test]
    fn test_transaction_name_validation() {
        assert!(TransactionName::new("weekly shop".to_string()).is_ok());
        assert_eq!(
            TransactionName::new(" ".to_string()),
            Err(TransactionNameError::Empty)
        );
    }

    #[test]
    fn test_currency_is_normalized() {
        assert_eq!(Currency::new("eur".to_string()).unwrap().as_str(), "EUR");
        assert_eq!(Currency::new("USD".to_string()).unwrap().as_str(), "USD");
    }

    #[test]
    fn test_currency_rejects_bad_codes() {
        for code in ["", "EU", "EURO", "E1R", "€€€"] {
            assert!(Currency::new(code.to_string()).is_err(), "{code}");
        }
    }
}
