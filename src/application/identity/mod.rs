//! Identity module: user management
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases: registration, lookup, full replacement and removal.

pub mod service;

pub use service::{UserInput, UserService};
