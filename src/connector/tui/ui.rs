use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::ChatApp;
use crate::domain::{Bubble, BubbleKind, ConversationState};

pub const TITLE: &str = "Gemini Chat";
pub const EMPTY_HINT: &str = "Start chatting with Gemini 👋";
pub const INPUT_PLACEHOLDER: &str = "Type your message…";

pub fn render(app: &mut ChatApp, frame: &mut Frame) {
    let [header_area, chat_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    render_header(app, frame, header_area);
    render_chat(app, frame, chat_area);
    render_input(app, frame, input_area);
}

fn render_header(app: &ChatApp, frame: &mut Frame, area: Rect) {
    let status = if app.state().is_pending() {
        Span::styled(" ● waiting for reply ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("")
    };

    let title = Line::from(vec![
        Span::styled(format!(" {TITLE} "), Style::default().fg(Color::Cyan).bold()),
        Span::styled(app.relay_url().to_string(), Style::default().fg(Color::Gray)),
        status,
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_chat(app: &mut ChatApp, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);

    let transcript = Paragraph::new(Text::from(transcript_lines(
        app.state(),
        app.animation_frame,
    )))
    .wrap(Wrap { trim: false });
    let total = wrapped_height(&transcript, inner_width);
    let max_scroll = total.saturating_sub(inner_height);

    if app.follow_tail || app.scroll >= max_scroll {
        app.scroll = max_scroll;
        app.follow_tail = true;
    }

    let chat = transcript.block(block).scroll((app.scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &ChatApp, frame: &mut Frame, area: Rect) {
    let state = app.state();
    let border_color = if state.can_submit() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let title = if state.is_pending() {
        " Waiting for Gemini… "
    } else {
        " Enter to send · Esc to quit "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    // Horizontal scroll keeps the cursor inside the box.
    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll_offset = if inner_width == 0 || app.cursor < inner_width {
        0
    } else {
        app.cursor - inner_width + 1
    };

    let input = if state.draft().is_empty() {
        Paragraph::new(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let visible: String = state
            .draft()
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible).style(Style::default().fg(Color::Cyan))
    };

    frame.render_widget(input.block(block), area);

    let cursor_x = (app.cursor - scroll_offset) as u16;
    frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
}

/// Every line of the transcript, bubbles in conversation order.
pub fn transcript_lines(state: &ConversationState, animation_frame: u8) -> Vec<Line<'static>> {
    if state.history().is_empty() && !state.is_pending() {
        return vec![
            Line::default(),
            Line::from(Span::styled(EMPTY_HINT, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center),
        ];
    }

    let mut lines = Vec::new();
    for bubble in state.bubbles() {
        push_bubble(&mut lines, bubble, animation_frame);
    }
    lines
}

fn push_bubble(lines: &mut Vec<Line<'static>>, bubble: Bubble<'_>, animation_frame: u8) {
    let alignment = if bubble.is_right_aligned() {
        Alignment::Right
    } else {
        Alignment::Left
    };

    let (label, label_style, body_style) = match bubble.kind {
        BubbleKind::User => (
            "You",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Style::default(),
        ),
        BubbleKind::Assistant if bubble.is_error() => (
            "Gemini",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Red),
        ),
        BubbleKind::Assistant => (
            "Gemini",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default(),
        ),
        BubbleKind::Pending => (
            "Gemini",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    };

    lines.push(Line::from(Span::styled(label, label_style)).alignment(alignment));

    if bubble.kind == BubbleKind::Pending {
        // "Thinking…" cycles through one to three dots.
        let base = bubble.text.trim_end_matches('…');
        let dots = ".".repeat(animation_frame as usize + 1);
        lines.push(
            Line::from(Span::styled(format!("{base}{dots}"), body_style)).alignment(alignment),
        );
    } else {
        for text in bubble.text.lines() {
            lines.push(
                Line::from(Span::styled(text.to_string(), body_style)).alignment(alignment),
            );
        }
    }

    lines.push(Line::default());
}

/// Rows an unbordered paragraph occupies once word-wrapped to `width`
/// columns, counted by the same wrapper that draws it.
pub fn wrapped_height(paragraph: &Paragraph<'_>, width: u16) -> u16 {
    paragraph
        .line_count(width.max(1))
        .min(u16::MAX as usize) as u16
}
