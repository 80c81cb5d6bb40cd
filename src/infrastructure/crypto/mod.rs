//! Cryptographic adapters

pub mod password;

pub use password::BcryptHasher;
