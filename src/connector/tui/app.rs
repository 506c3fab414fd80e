use std::sync::Arc;

use crate::application::{ConversationStore, RelayClient};
use crate::domain::ConversationState;

/// Convert a character index to a byte index for UTF-8 safe string edits.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Terminal chat session: the conversation plus everything that only matters
/// on screen (cursor, scroll, animation).
pub struct ChatApp {
    store: ConversationStore,
    relay_url: String,
    /// Cursor position in the draft, in characters.
    pub cursor: usize,
    /// First visible line of the transcript.
    pub scroll: u16,
    /// Pin the transcript to its newest line on the next draw.
    pub follow_tail: bool,
    pub animation_frame: u8,
    pub should_quit: bool,
}

impl ChatApp {
    pub fn new(relay: Arc<dyn RelayClient>, relay_url: impl Into<String>) -> Self {
        Self {
            store: ConversationStore::new(relay),
            relay_url: relay_url.into(),
            cursor: 0,
            scroll: 0,
            follow_tail: true,
            animation_frame: 0,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &ConversationState {
        self.store.state()
    }

    pub fn relay_url(&self) -> &str {
        &self.relay_url
    }

    /// Send the draft. Ignored while a reply is outstanding or the draft is
    /// blank.
    pub fn submit(&mut self) {
        if self.store.dispatch() {
            self.cursor = 0;
            self.animation_frame = 0;
            self.follow_tail = true;
        }
    }

    /// Advance the pending animation and apply a finished relay call.
    pub async fn tick(&mut self) {
        if self.state().is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        if self.store.poll_reply().await {
            self.follow_tail = true;
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.cursor;
        let draft = self.store.draft_mut();
        let byte_pos = char_to_byte_index(draft, cursor);
        draft.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn delete_before_cursor(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let cursor = self.cursor;
        let draft = self.store.draft_mut();
        let byte_pos = char_to_byte_index(draft, cursor);
        draft.remove(byte_pos);
    }

    pub fn delete_at_cursor(&mut self) {
        let cursor = self.cursor;
        let draft = self.store.draft_mut();
        if cursor < draft.chars().count() {
            let byte_pos = char_to_byte_index(draft, cursor);
            draft.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.state().draft().chars().count();
        self.cursor = (self.cursor + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.state().draft().chars().count();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.follow_tail = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        // The renderer clamps and re-enables following at the bottom.
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow_tail = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::{ChatRequest, DomainError, Message};

    struct Echo;

    #[async_trait]
    impl RelayClient for Echo {
        async fn send(&self, request: &ChatRequest) -> Result<String, DomainError> {
            Ok(format!("re: {}", request.message()))
        }
    }

    fn app() -> ChatApp {
        ChatApp::new(Arc::new(Echo), "http://127.0.0.1:3000")
    }

    fn type_text(app: &mut ChatApp, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn test_editing_handles_multibyte_characters() {
        let mut app = app();
        type_text(&mut app, "héllo");
        app.cursor_left();
        app.cursor_left();
        app.delete_before_cursor();
        assert_eq!(app.state().draft(), "hélo");

        app.cursor_home();
        app.delete_at_cursor();
        assert_eq!(app.state().draft(), "élo");

        app.cursor_end();
        app.insert_char('!');
        assert_eq!(app.state().draft(), "élo!");
        assert_eq!(app.cursor, 4);
    }

    #[tokio::test]
    async fn test_submit_then_tick_delivers_reply() {
        let mut app = app();
        type_text(&mut app, "Hi");
        app.submit();

        assert!(app.state().is_pending());
        assert_eq!(app.cursor, 0);
        assert_eq!(app.state().history(), &[Message::user("Hi")]);

        for _ in 0..100 {
            app.tick().await;
            if !app.state().is_pending() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        assert_eq!(
            app.state().history(),
            &[Message::user("Hi"), Message::assistant("re: Hi")]
        );
        assert!(app.follow_tail);
    }

    #[tokio::test]
    async fn test_blank_submit_is_ignored() {
        let mut app = app();
        type_text(&mut app, "   ");
        app.submit();

        assert!(!app.state().is_pending());
        assert!(app.state().history().is_empty());
        assert_eq!(app.cursor, 3);
    }

    #[test]
    fn test_scrolling_up_stops_following() {
        let mut app = app();
        app.scroll = 10;
        app.scroll_up(3);
        assert_eq!(app.scroll, 7);
        assert!(!app.follow_tail);

        app.scroll_to_bottom();
        assert!(app.follow_tail);
    }
}
