use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::connector::adapter::CHAT_PATH;

use super::container::Container;
use super::router::create_router;

pub struct RelayServerConfig {
    pub bind_addr: SocketAddr,
}

/// HTTP front for the relay.
pub struct RelayServer {
    config: RelayServerConfig,
    container: Arc<Container>,
}

impl RelayServer {
    pub fn new(config: RelayServerConfig, container: Arc<Container>) -> Self {
        Self { config, container }
    }

    pub async fn start(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        serve(listener, self.container).await
    }
}

/// Serve the relay on an already-bound listener until the process exits.
pub async fn serve(listener: TcpListener, container: Arc<Container>) -> Result<()> {
    let addr = listener.local_addr()?;

    if !container.has_api_key() {
        warn!("Upstream API key is not set; chat requests will fail until it is");
    }
    info!(
        "Relay listening on http://{}{} (model {})",
        addr,
        CHAT_PATH,
        container.model_name()
    );

    axum::serve(listener, create_router(container)).await?;
    Ok(())
}
