//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::application::ports::PasswordHasher;
use crate::domain::{DomainError, DomainResult};

/// bcrypt-backed [`PasswordHasher`] with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        hash(plaintext, self.cost).map_err(|e| DomainError::Hashing(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> DomainResult<bool> {
        verify(plaintext, hash).map_err(|e| DomainError::Hashing(e.to_string()))
    }
}
