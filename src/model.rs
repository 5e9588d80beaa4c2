//! Explicit request and response types for every backend endpoint.
//!
//! Field names follow the backend's camelCase JSON. Timestamps are RFC 3339 and optional
//! because not every endpoint includes them.

pub mod auth;
pub mod category;
pub mod expense;
pub mod stats;
pub mod user;

pub use auth::*;
pub use category::*;
pub use expense::*;
pub use stats::*;
pub use user::*;
