pub mod identity;
pub mod ports;

// Re-export key types for convenience
pub use identity::{UserInput, UserService};
pub use ports::{PasswordHasher, SharedPasswordHasher};
