//! Domain layer: the `User` aggregate and its rules.

pub mod user;

pub use user::{EmailDomainPolicy, User, UserChanges, UserRepositoryInterface};

// Re-export the error types from shared for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
