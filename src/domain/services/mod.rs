//! Error types shared by every layer.

mod error;
mod relay_error;

pub use error::*;
pub use relay_error::*;
