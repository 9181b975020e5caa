//! A single citation under an assistant message.
//!
//! ```text
//! ╭──────────────────────────────────────────────╮
//! │ ↗ Introduction to Machine Learning article ↗ │
//! │ A comprehensive guide to understanding ...   │
//! ╰──────────────────────────────────────────────╯
//! ```
//!
//! The trailing `↗` only appears when the source has a URL, and only then
//! does clicking the card open anything.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::conversation::Source;
use crate::tui::format::{EXTERNAL_LINK_ICON, source_icon};
use crate::tui::theme::Palette;

/// Borders (2) + padding (2)
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
const VERTICAL_OVERHEAD: u16 = 2;

#[derive(Clone, Copy)]
pub struct SourceCard<'a> {
    pub source: &'a Source,
    pub palette: &'a Palette,
}

impl<'a> SourceCard<'a> {
    pub fn new(source: &'a Source, palette: &'a Palette) -> Self {
        Self { source, palette }
    }

    /// Height of the card at `width`, borders included.
    pub fn calculate_height(source: &Source, width: u16) -> u16 {
        let description_lines = description_lines(source, width).len();
        VERTICAL_OVERHEAD + 1 + u16::try_from(description_lines).unwrap_or(u16::MAX)
    }

    fn type_label(source: &Source) -> String {
        match source.url {
            Some(_) => format!("{} {EXTERNAL_LINK_ICON}", source.kind.label()),
            None => source.kind.label().to_string(),
        }
    }
}

fn description_lines(source: &Source, width: u16) -> Vec<String> {
    let content_width = usize::from(width.saturating_sub(HORIZONTAL_OVERHEAD));
    match source.description.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() && content_width > 0 => {
            let options = textwrap::Options::new(content_width)
                .break_words(true)
                .word_separator(textwrap::WordSeparator::AsciiSpace);
            textwrap::wrap(text, options)
                .into_iter()
                .map(|line| line.into_owned())
                .collect()
        }
        _ => Vec::new(),
    }
}

impl Widget for SourceCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(p.border))
            .style(Style::default().bg(p.surface))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let label = Self::type_label(self.source);
        let label_width = u16::try_from(label.width()).unwrap_or(0);
        let [title_row, description_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        let [title_area, _gap, label_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(label_width),
        ])
        .areas(title_row);

        let title_color = if self.source.url.is_some() { p.accent } else { p.text };
        let title = Line::from(vec![
            Span::styled(source_icon(self.source.kind), Style::default().fg(p.muted)),
            Span::raw(" "),
            Span::styled(
                self.source.title.as_str(),
                Style::default().fg(title_color).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(title).render(title_area, buf);
        Paragraph::new(label)
            .style(Style::default().fg(p.muted))
            .render(label_area, buf);

        let description: Vec<Line> = description_lines(self.source, area.width)
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(p.muted))))
            .collect();
        Paragraph::new(description).render(description_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::SourceKind;
    use crate::core::state::Theme;

    fn draw(source: &Source, width: u16) -> Vec<String> {
        let palette = Palette::for_theme(Theme::Light);
        let height = SourceCard::calculate_height(source, width);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        SourceCard::new(source, &palette).render(area, &mut buf);
        (0..height)
            .map(|y| (0..width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn height_without_description_is_one_row_plus_borders() {
        let source = Source::new("1", "Paper", SourceKind::Pdf);
        assert_eq!(SourceCard::calculate_height(&source, 40), 3);
    }

    #[test]
    fn description_wraps() {
        let source = Source::new("1", "Doc", SourceKind::Document)
            .with_description("alpha beta gamma delta");
        // content width 10 - 4 = 6 → "alpha" | "beta" | "gamma" | "delta"
        assert_eq!(SourceCard::calculate_height(&source, 10), 3 + 4);
    }

    #[test]
    fn blank_description_is_ignored() {
        let source = Source::new("1", "Doc", SourceKind::Document).with_description("   ");
        assert_eq!(SourceCard::calculate_height(&source, 40), 3);
    }

    #[test]
    fn linked_source_shows_type_and_link_glyph() {
        let source = Source::new("1", "Intro", SourceKind::Article)
            .with_url("https://example.com")
            .with_description("A guide.");
        let rows = draw(&source, 40);
        assert!(rows[1].contains("Intro"));
        assert!(rows[1].contains("article ↗"));
        assert!(rows[1].trim_start_matches(['│', ' ']).starts_with(EXTERNAL_LINK_ICON));
        assert!(rows[2].contains("A guide."));
    }

    #[test]
    fn unlinked_source_has_no_link_glyph() {
        let source = Source::new("2", "Paper", SourceKind::Pdf);
        let rows = draw(&source, 40);
        assert!(rows[1].contains("pdf"));
        assert!(!rows[1].contains(EXTERNAL_LINK_ICON));
        assert!(rows[1].contains(crate::tui::format::DOCUMENT_ICON));
    }
}
