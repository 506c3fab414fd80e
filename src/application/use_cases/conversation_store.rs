use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::RelayClient;
use crate::domain::{ConversationState, DomainError};

/// Owns a [`ConversationState`] and drives its single request lifecycle
/// against a [`RelayClient`].
///
/// Two ways to run a submit:
/// - [`submit`](Self::submit) awaits the relay inline;
/// - [`dispatch`](Self::dispatch) spawns the call and
///   [`poll_reply`](Self::poll_reply) applies it once it resolves, so an event
///   loop can keep drawing while `Awaiting`.
pub struct ConversationStore {
    state: ConversationState,
    relay: Arc<dyn RelayClient>,
    in_flight: Option<JoinHandle<Result<String, DomainError>>>,
}

impl ConversationStore {
    pub fn new(relay: Arc<dyn RelayClient>) -> Self {
        Self {
            state: ConversationState::new(),
            relay,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn draft_mut(&mut self) -> &mut String {
        self.state.draft_mut()
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.state.set_draft(draft);
    }

    /// Submit the draft and wait for the outcome.
    ///
    /// Returns `false` without touching anything when the draft is blank or a
    /// call is already outstanding.
    pub async fn submit(&mut self) -> bool {
        let Some(request) = self.state.begin_submit() else {
            return false;
        };

        let outcome = self.relay.send(&request).await;
        self.settle(outcome);
        true
    }

    /// Submit the draft on a background task. Same guard as
    /// [`submit`](Self::submit).
    pub fn dispatch(&mut self) -> bool {
        let Some(request) = self.state.begin_submit() else {
            return false;
        };

        let relay = Arc::clone(&self.relay);
        self.in_flight = Some(tokio::spawn(async move { relay.send(&request).await }));
        true
    }

    /// Apply the outcome of a dispatched call if it has resolved.
    ///
    /// Returns `true` when the conversation changed.
    pub async fn poll_reply(&mut self) -> bool {
        let finished = self
            .in_flight
            .as_ref()
            .is_some_and(|handle| handle.is_finished());
        if !finished {
            return false;
        }

        let Some(handle) = self.in_flight.take() else {
            return false;
        };
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(DomainError::internal(format!("relay task failed: {e}"))),
        };
        self.settle(outcome);
        true
    }

    /// Wait for a dispatched call, however long it takes.
    pub async fn wait_reply(&mut self) -> bool {
        let Some(handle) = self.in_flight.take() else {
            return false;
        };
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(DomainError::internal(format!("relay task failed: {e}"))),
        };
        self.settle(outcome);
        true
    }

    fn settle(&mut self, outcome: Result<String, DomainError>) {
        match &outcome {
            Ok(reply) => debug!("Relay replied with {} chars", reply.chars().count()),
            Err(e) => warn!("Relay call failed: {}", e),
        }
        self.state.finish(outcome);
    }
}
