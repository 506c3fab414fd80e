mod env_credentials;
mod gemini_client;
mod http_relay_client;
mod mock_generative_client;

pub use env_credentials::*;
pub use gemini_client::*;
pub use http_relay_client::*;
pub use mock_generative_client::*;
