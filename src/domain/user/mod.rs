//! User aggregate
//!
//! Contains the User entity, the email-domain rule, and the repository interface.

pub mod email;
pub mod model;
pub mod repository;

pub use email::EmailDomainPolicy;
pub use model::{User, UserChanges};
pub use repository::UserRepositoryInterface;
