//! # Domain Layer
//!
//! Conversation models, the wire payloads they translate to, and error types.
//! This layer is independent of external frameworks and infrastructure.

pub mod models;
pub mod services;

pub use models::*;
pub use services::*;
