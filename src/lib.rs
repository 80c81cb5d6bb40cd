//! # Users Service
//!
//! HTTP CRUD service over a single `users` table with bcrypt password
//! storage and a single-domain registration rule.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: The `User` entity, the email-domain rule, repository trait
//! - **application**: `UserService` use cases and outbound ports (password hashing)
//! - **infrastructure**: SeaORM persistence, bcrypt hashing
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime wiring, startup and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{ensure_schema, init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
