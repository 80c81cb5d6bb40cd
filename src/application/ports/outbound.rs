//! Outbound ports: capabilities the user service needs from the outside
//!
//! [`PasswordHasher`] decouples the service from the concrete hashing
//! scheme. The production implementation is
//! [`BcryptHasher`](crate::infrastructure::crypto::password::BcryptHasher),
//! built once at start-up with the configured cost and injected.

use std::sync::Arc;

use crate::domain::DomainResult;

/// One-way, salted password hashing.
///
/// Implementations are stateless apart from their parameters and may be
/// called from any thread. Hashing is expected to be slow.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    fn verify(&self, plaintext: &str, hash: &str) -> DomainResult<bool>;
}

pub type SharedPasswordHasher = Arc<dyn PasswordHasher>;
