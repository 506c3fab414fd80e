//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Upstream (Gemini `generateContent` over HTTPS, plus an offline mock)
//! - Credentials (process environment)
//! - Relay HTTP API (axum server and reqwest client)
//! - Terminal chat UI (ratatui)

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
