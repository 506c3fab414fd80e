use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gemini_chat::cli::Commands;
use gemini_chat::connector::api::{Container, ContainerConfig, RelayServer, RelayServerConfig};
use gemini_chat::connector::tui;
use gemini_chat::HttpRelayClient;

#[derive(Parser)]
#[command(name = "gemini-chat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, &cli.command)?;

    match cli.command {
        Commands::Serve {
            port,
            public,
            mock_upstream,
        } => {
            let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
            let bind_addr = SocketAddr::from((host, port));

            let container = Arc::new(Container::new(ContainerConfig {
                mock_upstream,
                ..ContainerConfig::default()
            }));

            RelayServer::new(RelayServerConfig { bind_addr }, container)
                .start()
                .await?;
        }

        Commands::Chat { relay_url, .. } => {
            let relay = Arc::new(HttpRelayClient::new(relay_url.as_str()));
            tui::run(relay, relay_url).await?;
        }
    }

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`.
///
/// The chat UI owns the terminal, so in chat mode logs go to `--log-file` or
/// nowhere.
fn init_logging(verbose: bool, command: &Commands) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let (writer, ansi) = match command {
        Commands::Chat {
            log_file: Some(path),
            ..
        } => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        Commands::Chat { log_file: None, .. } => (BoxMakeWriter::new(std::io::sink), false),
        Commands::Serve { .. } => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
