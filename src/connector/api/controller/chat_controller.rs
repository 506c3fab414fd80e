use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;
use std::sync::Arc;

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Run the relay for one HTTP request. Every outcome, including failures,
    /// becomes a JSON response.
    pub async fn chat(&self, method: &Method, body: &[u8]) -> Response {
        // Anything that is not JSON is treated like an empty body.
        let payload: Option<Value> = serde_json::from_slice(body).ok();

        let use_case = self.container.relay_use_case();
        match use_case.execute(method.as_str(), payload.as_ref()).await {
            Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
            Err(e) => {
                let status =
                    StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(e.body())).into_response()
            }
        }
    }
}

/// `ANY /api/chat`
pub async fn chat_handler(
    State(container): State<Arc<Container>>,
    method: Method,
    body: Bytes,
) -> Response {
    ChatController::new(&container).chat(&method, &body).await
}
