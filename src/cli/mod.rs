use clap::Subcommand;

use crate::connector::adapter::DEFAULT_RELAY_URL;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the chat relay HTTP server (POST /api/chat)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the relay on all network interfaces
        #[arg(long)]
        public: bool,

        /// Answer from a local echo generator instead of calling Gemini
        #[arg(long)]
        mock_upstream: bool,
    },

    /// Open the terminal chat client
    Chat {
        /// Base URL of a running relay
        #[arg(long, default_value = DEFAULT_RELAY_URL)]
        relay_url: String,

        /// Write logs to this file while the chat UI owns the terminal
        #[arg(long)]
        log_file: Option<String>,
    },
}
