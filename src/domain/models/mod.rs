mod conversation;
mod message;
mod relay_payload;
mod upstream_turn;

pub use conversation::*;
pub use message::*;
pub use relay_payload::*;
pub use upstream_turn::*;
