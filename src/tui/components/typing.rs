//! Three-dot "assistant is typing" bubble.
//!
//! Not a message: the message list draws it after the last bubble while the
//! controller reports a pending reply. One dot is lit per animation step.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::tui::theme::Palette;

const DOT: &str = "●";
const DOT_COUNT: usize = 3;
/// Bubble (3 rows) plus the footer-sized gap under it
pub const TYPING_HEIGHT: u16 = 4;
/// "● ● ●" plus borders and padding
const BUBBLE_WIDTH: u16 = 9;

#[derive(Clone, Copy)]
pub struct TypingIndicator<'a> {
    pub palette: &'a Palette,
    /// Monotonic animation step; the lit dot is `frame % 3`
    pub frame: usize,
}

impl<'a> TypingIndicator<'a> {
    pub fn new(palette: &'a Palette, frame: usize) -> Self {
        Self { palette, frame }
    }

    fn dots(&self) -> Line<'static> {
        let p = self.palette;
        let lit = self.frame % DOT_COUNT;
        let mut spans = Vec::with_capacity(DOT_COUNT * 2);
        for i in 0..DOT_COUNT {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if i == lit {
                Style::default().fg(p.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(p.muted).add_modifier(Modifier::DIM)
            };
            spans.push(Span::styled(DOT, style));
        }
        Line::from(spans)
    }
}

impl Widget for TypingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let bubble = Rect::new(area.x, area.y, BUBBLE_WIDTH, 3).intersection(area);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(p.assistant_border))
            .style(Style::default().bg(p.assistant_bubble))
            .padding(Padding::horizontal(1));
        let inner = block.inner(bubble);
        block.render(bubble, buf);
        Paragraph::new(self.dots()).render(inner, buf);
    }
}
