//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;

pub use crypto::BcryptHasher;
pub use database::{ensure_schema, init_database, DatabaseConfig};
