//! Application ports (hexagonal architecture boundaries)
//!
//! Outbound ports the application layer depends on. Implementations live
//! in `infrastructure`.

pub mod outbound;

pub use outbound::{PasswordHasher, SharedPasswordHasher};
