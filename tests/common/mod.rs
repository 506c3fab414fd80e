//! Shared fixtures: a scriptable fake Gemini endpoint and a relay wired to it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{RawQuery, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;

use gemini_chat::connector::api::{create_router, Container};
use gemini_chat::{
    CredentialProvider, GeminiClient, GenerativeClient, MockGenerativeClient,
    StaticCredentialProvider,
};

pub const TEST_KEY: &str = "test-key";
pub const TEST_MODEL: &str = "gemini-1.5-flash";

/// What the fake upstream answers with.
pub enum Canned {
    Json(u16, Value),
    Text(u16, &'static str),
}

pub struct FakeUpstream {
    canned: Canned,
    calls: AtomicUsize,
    last_body: Mutex<Option<Value>>,
    last_query: Mutex<Option<String>>,
    last_path: Mutex<Option<String>>,
}

impl FakeUpstream {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn last_path(&self) -> Option<String> {
        self.last_path.lock().unwrap().clone()
    }
}

async fn upstream_handler(
    State(upstream): State<Arc<FakeUpstream>>,
    uri: Uri,
    RawQuery(query): RawQuery,
    body: axum::body::Bytes,
) -> Response {
    upstream.calls.fetch_add(1, Ordering::SeqCst);
    *upstream.last_body.lock().unwrap() = serde_json::from_slice(&body).ok();
    *upstream.last_query.lock().unwrap() = query;
    *upstream.last_path.lock().unwrap() = Some(uri.path().to_string());

    match &upstream.canned {
        Canned::Json(status, body) => (
            StatusCode::from_u16(*status).unwrap(),
            axum::Json(body.clone()),
        )
            .into_response(),
        Canned::Text(status, text) => {
            (StatusCode::from_u16(*status).unwrap(), *text).into_response()
        }
    }
}

pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Start a fake Gemini endpoint answering every request with `canned`.
pub async fn spawn_upstream(canned: Canned) -> (SocketAddr, Arc<FakeUpstream>) {
    let upstream = Arc::new(FakeUpstream {
        canned,
        calls: AtomicUsize::new(0),
        last_body: Mutex::new(None),
        last_query: Mutex::new(None),
        last_path: Mutex::new(None),
    });
    let router = Router::new()
        .fallback(upstream_handler)
        .with_state(upstream.clone());
    (spawn(router).await, upstream)
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub async fn spawn_relay_with(
    client: Arc<dyn GenerativeClient>,
    credentials: Arc<dyn CredentialProvider>,
) -> SocketAddr {
    let container = Arc::new(Container::with_adapters(client, credentials));
    spawn(create_router(container)).await
}

/// Relay forwarding to `upstream` with the test key configured.
pub async fn spawn_relay(upstream: SocketAddr) -> SocketAddr {
    spawn_relay_with(
        Arc::new(GeminiClient::new(TEST_MODEL, format!("http://{upstream}"))),
        Arc::new(StaticCredentialProvider::with_key(TEST_KEY)),
    )
    .await
}

/// Relay answering from the in-process mock generator.
pub async fn spawn_mock_relay() -> SocketAddr {
    spawn_relay_with(
        Arc::new(MockGenerativeClient::new()),
        Arc::new(StaticCredentialProvider::with_key(TEST_KEY)),
    )
    .await
}

pub fn chat_url(relay: SocketAddr) -> String {
    format!("http://{relay}/api/chat")
}

pub fn candidate(text: &str) -> Value {
    serde_json::json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
}
