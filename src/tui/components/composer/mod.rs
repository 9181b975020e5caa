//! # Composer Component
//!
//! The text input at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Own the pending input text and cursor
//! - Handle editing (insert, paste, backspace, delete, cursor movement)
//! - Grow with its content between one and five rows, then scroll
//! - Emit `Submit` with trimmed text on Enter; Shift+Enter arrives here as a
//!   plain `'\n'` character
//! - Render the send control, enabled by the same rule that gates submit
//!
//! ## State Management
//!
//! The buffer is internal state. The palette and the `dimmed` flag (cursor
//! mode is active) are props from the parent.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::conversation;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, MIN_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, line_count,
    next_char_boundary, prev_char_boundary, visual_lines,
};

pub const PLACEHOLDER: &str = "Type your message here...";
pub const HINT: &str = "Press Enter to send, Shift + Enter for new line";

/// Columns taken by the send control, including the gap before it.
const SEND_WIDTH: u16 = 9;
const SEND_HEIGHT: u16 = 3;
const HINT_HEIGHT: u16 = 1;

/// High-level events emitted by the Composer
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    /// The user submitted non-blank text (already trimmed)
    Submit(String),
    /// Buffer or cursor changed
    ContentChanged,
}

/// Where each part of the composer lands inside its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerLayout {
    pub input: Rect,
    pub send: Rect,
    pub hint: Rect,
}

pub struct Composer {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Colors for the current theme (Prop)
    pub palette: Palette,
    /// Rendered without a cursor while the message list has focus (Prop)
    pub dimmed: bool,
    cursor: CursorState,
}

impl Composer {
    pub fn new(palette: Palette) -> Self {
        Self {
            buffer: String::new(),
            palette,
            dimmed: false,
            cursor: CursorState::new(),
        }
    }

    /// Whether the current text would be accepted. Drives the send control.
    pub fn can_submit(&self) -> bool {
        conversation::submittable(&self.buffer).is_some()
    }

    /// Take the trimmed text out and clear the buffer, if it is submittable.
    /// Blank text is left untouched.
    pub fn take_submission(&mut self) -> Option<String> {
        let text = conversation::submittable(&self.buffer)?.to_string();
        self.buffer.clear();
        self.cursor.reset();
        Some(text)
    }

    /// Total height (input block + hint line) for a composer `width` wide.
    pub fn calculate_height(&self, width: u16) -> u16 {
        self.input_height(Self::input_width(width)) + HINT_HEIGHT
    }

    fn input_width(width: u16) -> u16 {
        width.saturating_sub(SEND_WIDTH)
    }

    fn input_height(&self, input_width: u16) -> u16 {
        let lines = line_count(&self.buffer, inner_width(input_width));
        lines.clamp(MIN_VISIBLE_LINES, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Split `area` into input, send control and hint.
    pub fn layout(&self, area: Rect) -> ComposerLayout {
        let [row, hint] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(HINT_HEIGHT)]).areas(area);
        let [input, _gap, send_column] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(SEND_WIDTH - 1),
        ])
        .areas(row);

        // The send control hugs the bottom of the input, like the input grows upward
        let send_height = SEND_HEIGHT.min(send_column.height);
        let send = Rect {
            y: send_column.bottom().saturating_sub(send_height),
            height: send_height,
            ..send_column
        };

        ComposerLayout { input, send, hint }
    }

    fn visible_lines(&self, input_width: u16) -> Vec<Line<'_>> {
        let p = &self.palette;
        if self.buffer.is_empty() {
            return vec![Line::from(Span::styled(PLACEHOLDER, Style::default().fg(p.muted)))];
        }
        visual_lines(&self.buffer, inner_width(input_width))
            .into_iter()
            .skip(usize::from(self.cursor.scroll_offset))
            .take(usize::from(MAX_VISIBLE_LINES))
            .map(|range| Line::from(Span::styled(&self.buffer[range], Style::default().fg(p.text))))
            .collect()
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let total = line_count(&self.buffer, inner_width(area.width));
        if total <= MAX_VISIBLE_LINES {
            return;
        }

        // content_length is the max scroll position, not the line count
        let max_scroll = total - MAX_VISIBLE_LINES;
        let mut state = ScrollbarState::default()
            .content_length(usize::from(max_scroll))
            .position(usize::from(self.cursor.scroll_offset));

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut state,
        );
    }

    fn render_send(&self, frame: &mut Frame, area: Rect) {
        let p = &self.palette;
        let (bg, fg) = if self.can_submit() {
            (p.accent, p.accent_text)
        } else {
            (p.disabled, p.disabled_text)
        };
        let button = Paragraph::new("Send")
            .alignment(Alignment::Center)
            .style(Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(bg).bg(bg)),
            );
        frame.render_widget(button, area);
    }
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let layout = self.layout(area);
        let input = layout.input;

        self.cursor.last_width = input.width;
        self.cursor.update_scroll_offset(&self.buffer, input.width);

        let border = if self.dimmed { p.border } else { p.accent };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(p.surface))
            .padding(Padding::horizontal(1));
        let paragraph = Paragraph::new(self.visible_lines(input.width)).block(block);
        frame.render_widget(paragraph, input);
        self.render_scrollbar(frame, input);

        self.render_send(frame, layout.send);

        let hint = Paragraph::new(HINT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(p.muted));
        frame.render_widget(hint, layout.hint);

        if !self.dimmed {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, input));
        }
    }
}

impl EventHandler for Composer {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let pos = self.cursor.pos;
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Terminals send CR for line breaks in pastes
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(pos, &text);
                self.cursor.pos += text.len();
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Backspace => (pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, pos);
                self.buffer.drain(prev..pos);
                self.cursor.pos = prev;
                ComposerEvent::ContentChanged
            }),
            TuiEvent::Delete => (pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, pos);
                self.buffer.drain(pos..next);
                ComposerEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, pos);
                ComposerEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, pos);
                ComposerEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..pos].rfind('\n').map_or(0, |i| i + 1);
                (pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    ComposerEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[pos..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| pos + i);
                (pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    ComposerEvent::ContentChanged
                })
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_width)
                .then_some(ComposerEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_width)
                .then_some(ComposerEvent::ContentChanged),
            TuiEvent::Submit => self.take_submission().map(ComposerEvent::Submit),
            _ => None,
        }
    }
}
