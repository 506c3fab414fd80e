use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::any;
use axum::Router;

use crate::connector::adapter::CHAT_PATH;

use super::container::Container;
use super::controller::chat_handler;

/// The relay's only route. Every method and body size reaches the handler so
/// that non-POST requests get the relay's own 405 body.
pub fn create_router(container: Arc<Container>) -> Router {
    Router::new()
        .route(CHAT_PATH, any(chat_handler))
        .layer(DefaultBodyLimit::disable())
        .with_state(container)
}
