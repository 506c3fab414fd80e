//! Terminal chat client.

pub mod app;
pub mod handler;
pub mod terminal;
pub mod ui;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::application::RelayClient;

pub use app::ChatApp;

/// Run the chat UI until the user quits. The terminal is restored on every
/// exit path, including errors.
pub async fn run(relay: Arc<dyn RelayClient>, relay_url: String) -> Result<()> {
    info!("Starting chat UI against {}", relay_url);

    terminal::install_panic_hook();
    let mut tui = terminal::init()?;
    let mut app = ChatApp::new(relay, relay_url);
    let mut events = terminal::EventHandler::new();

    let result = run_loop(&mut tui, &mut app, &mut events).await;

    terminal::restore()?;
    result
}

async fn run_loop(
    tui: &mut terminal::Tui,
    app: &mut ChatApp,
    events: &mut terminal::EventHandler,
) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}
