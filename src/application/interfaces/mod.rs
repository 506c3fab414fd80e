mod credential_provider;
mod generative_client;
mod relay_client;

pub use credential_provider::*;
pub use generative_client::*;
pub use relay_client::*;
