use super::{ChatRequest, Message, Role};

/// Prefix of the assistant turn shown when a relay call fails.
pub const ERROR_MARKER: &str = "⚠️ Error: ";

/// Text of the transient bubble shown while a reply is outstanding.
pub const PENDING_TEXT: &str = "Thinking…";

/// Client-side conversation: the ordered turns, the draft being typed and
/// whether a relay call is outstanding.
///
/// Submitting is split into two steps so the intermediate state (user turn
/// shown, reply not yet in) can be rendered and tested:
/// [`begin_submit`](Self::begin_submit) moves `Idle → Awaiting` and
/// [`finish`](Self::finish) moves `Awaiting → Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    history: Vec<Message>,
    pending: bool,
    draft: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Awaiting,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn phase(&self) -> Phase {
        if self.pending {
            Phase::Awaiting
        } else {
            Phase::Idle
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    /// Whether a submit would be accepted right now.
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.draft.trim().is_empty()
    }

    /// `Idle → Awaiting`.
    ///
    /// Returns the request to send, or `None` when the draft is blank or a
    /// call is already outstanding. The request's history is captured before
    /// the new user turn is appended.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        if !self.can_submit() {
            return None;
        }

        let message = self.draft.trim().to_string();
        let request = ChatRequest::new(message.clone(), self.history.clone());

        self.history.push(Message::user(message));
        self.draft.clear();
        self.pending = true;

        Some(request)
    }

    /// `Awaiting → Idle` on success.
    pub fn complete_with_reply(&mut self, reply: impl Into<String>) {
        self.history.push(Message::assistant(reply));
        self.pending = false;
    }

    /// `Awaiting → Idle` on failure; the reason is shown as an assistant turn.
    pub fn complete_with_error(&mut self, reason: &str) {
        let reason = if reason.is_empty() { "unknown" } else { reason };
        self.history
            .push(Message::assistant(format!("{ERROR_MARKER}{reason}")));
        self.pending = false;
    }

    /// Apply whichever terminal transition `outcome` calls for. Pending is
    /// cleared on both arms.
    pub fn finish<E: std::fmt::Display>(&mut self, outcome: Result<String, E>) {
        match outcome {
            Ok(reply) => self.complete_with_reply(reply),
            Err(e) => self.complete_with_error(&e.to_string()),
        }
    }

    /// Bubbles to draw, oldest first: one per history turn, plus a trailing
    /// pending bubble while a reply is outstanding.
    pub fn bubbles(&self) -> impl Iterator<Item = Bubble<'_>> + '_ {
        self.history
            .iter()
            .map(Bubble::from_message)
            .chain(self.pending.then_some(Bubble {
                kind: BubbleKind::Pending,
                text: PENDING_TEXT,
            }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    User,
    Assistant,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bubble<'a> {
    pub kind: BubbleKind,
    pub text: &'a str,
}

impl<'a> Bubble<'a> {
    fn from_message(message: &'a Message) -> Self {
        let kind = match message.role() {
            Role::User => BubbleKind::User,
            Role::Assistant => BubbleKind::Assistant,
        };
        Self {
            kind,
            text: message.content(),
        }
    }

    /// User turns sit on the right, everything else on the left.
    pub fn is_right_aligned(&self) -> bool {
        self.kind == BubbleKind::User
    }

    pub fn is_error(&self) -> bool {
        self.kind == BubbleKind::Assistant && self.text.starts_with(ERROR_MARKER)
    }
}
