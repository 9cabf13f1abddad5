pub mod create_transaction;
pub mod delete_transaction;
pub mod get_transaction;
pub mod list_transactions;

pub use create_transaction::create_transaction;
pub use delete_transaction::delete_transaction;
pub use get_transaction::get_transaction;
pub use list_transactions::list_transactions;
pub use list_transactions::list_transactions_by_category;
