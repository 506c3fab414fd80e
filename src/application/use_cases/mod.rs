mod conversation_store;
mod relay_chat;

pub use conversation_store::*;
pub use relay_chat::*;
