use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::conversation::Message;
use crate::tui::component::Component;
use crate::tui::components::source_card::SourceCard;
use crate::tui::format::format_time;
use crate::tui::theme::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Row under the bubble for the timestamp and copy feedback. Also the gap
/// to the next bubble.
pub const FOOTER_HEIGHT: u16 = 1;
/// Bubbles never take more than this share of the list width.
const MAX_WIDTH_PERCENT: u16 = 70;

pub const COPIED_LABEL: &str = "Copied!";
const SOURCES_LABEL: &str = "Sources";

/// Part of a bubble row under a given point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleRegion {
    /// Text, borders or the sources label: clicking copies the message.
    Body,
    /// The n-th visible source card.
    Source(usize),
}

/// Geometry of one bubble row, relative to the row's top-left corner.
struct Measure {
    /// Bubble rectangle (without the footer)
    bubble: Rect,
    text_lines: Vec<String>,
    card_heights: Vec<u16>,
}

impl Measure {
    fn new(message: &Message, width: u16) -> Self {
        let share = u32::from(width) * u32::from(MAX_WIDTH_PERCENT) / 100;
        let max_width = u16::try_from(share)
            .unwrap_or(width)
            .max(HORIZONTAL_OVERHEAD + 1);
        let max_content = max_width.saturating_sub(HORIZONTAL_OVERHEAD).max(1);
        let text_lines = wrap_text(&message.text, max_content);
        let sources = message.visible_sources();

        let bubble_width = if sources.is_empty() {
            let widest = text_lines.iter().map(|l| l.width()).max().unwrap_or(0);
            let widest = u16::try_from(widest).unwrap_or(u16::MAX).clamp(1, max_content);
            widest + HORIZONTAL_OVERHEAD
        } else {
            max_width
        }
        .min(width);

        let card_width = bubble_width.saturating_sub(HORIZONTAL_OVERHEAD);
        let card_heights: Vec<u16> = sources
            .iter()
            .map(|s| SourceCard::calculate_height(s, card_width))
            .collect();

        let text_height = u16::try_from(text_lines.len()).unwrap_or(u16::MAX);
        let sources_height = if card_heights.is_empty() {
            0
        } else {
            1 + card_heights.iter().sum::<u16>()
        };
        let height = VERTICAL_OVERHEAD + text_height + sources_height;

        let x = if message.is_user {
            width.saturating_sub(bubble_width)
        } else {
            0
        };

        Self {
            bubble: Rect::new(x, 0, bubble_width, height),
            text_lines,
            card_heights,
        }
    }

    /// Row (relative to the bubble top) of the first source card.
    fn first_card_row(&self) -> u16 {
        1 + u16::try_from(self.text_lines.len()).unwrap_or(u16::MAX) + 1
    }
}

/// Wrap `text` to `width` columns, keeping explicit line breaks.
fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let options = textwrap::Options::new(usize::from(width.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let lines: Vec<String> = textwrap::wrap(text.trim_end(), options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// A stateless component that renders one chat message as a bubble.
///
/// # Layout
///
/// ```text
///                         ╭──────────────────────╮
///                         │ What is ML?          │   user: right-aligned
///                         ╰──────────────────────╯
///                                   09:41 Copied!    footer (hover/copy)
/// ╭──────────────────────────────╮
/// │ Machine learning is ...      │                   assistant: left
/// │ Sources                      │
/// │ ╭──────────────────────────╮ │
/// │ │ ↗ Intro to ML  article ↗ │ │
/// │ ╰──────────────────────────╯ │
/// ╰──────────────────────────────╯
/// ```
///
/// Hover and copy state are props. The parent `MessageList` tracks which
/// bubble is hovered and the `CopyFeedback` that says which were copied.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub message: &'a Message,
    pub palette: &'a Palette,
    /// strftime pattern for the footer timestamp
    pub time_format: &'a str,
    /// Under the mouse, or selected in cursor mode
    pub is_hovered: bool,
    /// Copy feedback still active for this message
    pub copied: bool,
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        palette: &'a Palette,
        time_format: &'a str,
        is_hovered: bool,
        copied: bool,
    ) -> Self {
        Self {
            message,
            palette,
            time_format,
            is_hovered,
            copied,
        }
    }

    /// Height of the whole row (bubble plus footer) at list width `width`.
    ///
    /// Text is pre-wrapped with `textwrap` and drawn line by line, so the
    /// measured height is exactly what gets rendered.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        if width <= HORIZONTAL_OVERHEAD {
            return 1 + FOOTER_HEIGHT;
        }
        Measure::new(message, width).bubble.height + FOOTER_HEIGHT
    }

    /// Which part of the row drawn at `width` lies at (`dx`, `dy`).
    pub fn region_at(message: &Message, width: u16, dx: u16, dy: u16) -> Option<BubbleRegion> {
        if width <= HORIZONTAL_OVERHEAD {
            return None;
        }
        let measure = Measure::new(message, width);
        let bubble = measure.bubble;
        if dx < bubble.x || dx >= bubble.right() || dy >= bubble.bottom() {
            return None;
        }

        let card_left = bubble.x + 1 + CONTENT_PAD_H;
        let card_right = bubble.right().saturating_sub(1 + CONTENT_PAD_H);
        if !measure.card_heights.is_empty() && dx >= card_left && dx < card_right {
            let mut top = measure.first_card_row();
            for (i, &h) in measure.card_heights.iter().enumerate() {
                if dy >= top && dy < top + h {
                    return Some(BubbleRegion::Source(i));
                }
                top += h;
            }
        }
        Some(BubbleRegion::Body)
    }

    fn footer(&self) -> Line<'static> {
        let p = self.palette;
        if !self.is_hovered {
            return Line::default();
        }
        let mut spans = vec![Span::styled(
            format_time(&self.message.timestamp, self.time_format),
            Style::default().fg(p.muted),
        )];
        if self.copied {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                COPIED_LABEL,
                Style::default().fg(p.success).add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for Bubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= HORIZONTAL_OVERHEAD || area.height == 0 {
            return;
        }
        let p = self.palette;
        let measure = Measure::new(self.message, area.width);
        let bubble = Rect {
            x: area.x + measure.bubble.x,
            y: area.y,
            ..measure.bubble
        }
        .intersection(area);

        let (bg, fg, base_border) = if self.message.is_user {
            (p.user_bubble, p.user_text, p.user_bubble)
        } else {
            (p.assistant_bubble, p.assistant_text, p.assistant_border)
        };
        let border_style = if self.is_hovered {
            let color = if self.message.is_user { p.user_text } else { p.accent };
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(base_border)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(Style::default().bg(bg))
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble);
        block.render(bubble, buf);

        let text: Vec<Line> = measure
            .text_lines
            .iter()
            .map(|l| Line::from(Span::styled(l.as_str(), Style::default().fg(fg))))
            .collect();
        let text_height = u16::try_from(text.len()).unwrap_or(u16::MAX);
        Paragraph::new(text).render(inner, buf);

        let sources = self.message.visible_sources();
        if !sources.is_empty() {
            let label_y = inner.y + text_height;
            if label_y < inner.bottom() {
                let label_area = Rect::new(inner.x, label_y, inner.width, 1);
                Paragraph::new(Span::styled(
                    SOURCES_LABEL,
                    Style::default().fg(p.muted).add_modifier(Modifier::BOLD),
                ))
                .render(label_area, buf);
            }

            let mut y = label_y + 1;
            for (source, &h) in sources.iter().zip(&measure.card_heights) {
                let card = Rect::new(inner.x, y, inner.width, h).intersection(inner);
                if card.height > 0 {
                    SourceCard::new(source, p).render(card, buf);
                }
                y += h;
            }
        }

        let footer_y = area.y + measure.bubble.height;
        if footer_y < area.bottom() {
            let footer_area = Rect::new(area.x, footer_y, area.width, FOOTER_HEIGHT);
            let alignment = if self.message.is_user {
                Alignment::Right
            } else {
                Alignment::Left
            };
            Paragraph::new(self.footer())
                .alignment(alignment)
                .render(footer_area, buf);
        }
    }
}

impl Component for Bubble<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
