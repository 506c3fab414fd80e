pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ConversationStore, CredentialProvider, GenerativeClient, RelayChatUseCase, RelayClient,
    UpstreamResponse, FALLBACK_REPLY,
};

pub use connector::{
    EnvCredentialProvider, GeminiClient, HttpRelayClient, MockGenerativeClient,
    StaticCredentialProvider,
};

pub use domain::{
    ChatReply, ChatRequest, ConversationState, DomainError, Message, RelayError, Role,
    UpstreamRole, UpstreamTurn,
};
