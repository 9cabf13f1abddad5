pub mod memory;
pub mod transaction;
pub mod user;

pub use memory::InMemoryTransactionRepository;
pub use memory::InMemoryUserRepository;
pub use transaction::PostgresTransactionRepository;
pub use user::PostgresUserRepository;
