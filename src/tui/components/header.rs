//! # Header Component
//!
//! Top bar with the assistant's name, a subtitle and the theme toggle.
//!
//! ## Stateless Component
//!
//! The header holds no state of its own. The current theme is a prop; the
//! toggle is "activated" by the parent, which hit-tests clicks against
//! [`Header::toggle_area`] and dispatches `Action::ToggleTheme`.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ Vertex AI Agent                      [ ☾ Dark ] ^T   │  row 0
//! │ Intelligent conversation partner                     │  row 1
//! │──────────────────────────────────────────────────────│  row 2 (rule)
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::state::Theme;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub const TITLE: &str = "Vertex AI Agent";
pub const SUBTITLE: &str = "Intelligent conversation partner";
pub const HEADER_HEIGHT: u16 = 3;

const SHORTCUT_HINT: &str = " ^T";
const RIGHT_MARGIN: u16 = 1;

pub struct Header {
    pub theme: Theme,
    pub palette: Palette,
}

impl Header {
    pub fn new(theme: Theme, palette: Palette) -> Self {
        Self { theme, palette }
    }

    fn toggle_label(theme: Theme) -> String {
        let icon = if theme.is_dark() { "☾" } else { "☀" };
        format!("[ {icon} {} ]", theme.label())
    }

    /// Screen area of the theme toggle inside a header drawn at `area`.
    pub fn toggle_area(theme: Theme, area: Rect) -> Rect {
        let label_width = u16::try_from(Self::toggle_label(theme).width()).unwrap_or(u16::MAX);
        let hint_width = u16::try_from(SHORTCUT_HINT.width()).unwrap_or(0);
        let right = area.right().saturating_sub(RIGHT_MARGIN + hint_width);
        let x = right.saturating_sub(label_width).max(area.x);
        Rect::new(x, area.y, right.saturating_sub(x), 1.min(area.height))
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(p.border))
            .style(Style::default().bg(p.surface))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(
                TITLE,
                Style::default().fg(p.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(SUBTITLE, Style::default().fg(p.muted))),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        let toggle = Self::toggle_area(self.theme, area);
        if toggle.width > 0 {
            let control = Line::from(vec![
                Span::styled(
                    Self::toggle_label(self.theme),
                    Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(SHORTCUT_HINT, Style::default().fg(p.muted)),
            ]);
            let control_area = Rect {
                width: area.right().saturating_sub(toggle.x + RIGHT_MARGIN),
                ..toggle
            };
            frame.render_widget(Paragraph::new(control), control_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(theme: Theme, width: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, HEADER_HEIGHT)).unwrap();
        let mut header = Header::new(theme, Palette::for_theme(theme));
        terminal
            .draw(|f| {
                let area = f.area();
                header.render(f, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..HEADER_HEIGHT)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn shows_title_and_subtitle() {
        let rows = render(Theme::Light, 80);
        assert!(rows[0].contains(TITLE));
        assert!(rows[1].contains(SUBTITLE));
    }

    #[test]
    fn toggle_reflects_theme() {
        assert!(render(Theme::Light, 80)[0].contains("Light"));
        let dark = render(Theme::Dark, 80);
        assert!(dark[0].contains("Dark"));
        assert!(!dark[0].contains("Light"));
    }

    #[test]
    fn toggle_area_sits_on_the_right_of_the_title_row() {
        let area = Rect::new(0, 0, 80, HEADER_HEIGHT);
        let toggle = Header::toggle_area(Theme::Light, area);
        assert_eq!(toggle.y, 0);
        assert_eq!(toggle.height, 1);
        assert_eq!(toggle.width, "[ ☀ Light ]".width() as u16);
        assert_eq!(toggle.right(), 80 - RIGHT_MARGIN - SHORTCUT_HINT.len() as u16);
    }

    #[test]
    fn toggle_label_is_drawn_inside_toggle_area() {
        let area = Rect::new(0, 0, 80, HEADER_HEIGHT);
        let toggle = Header::toggle_area(Theme::Dark, area);
        let rows = render(Theme::Dark, 80);
        let drawn: String = rows[0]
            .chars()
            .skip(toggle.x as usize)
            .take(toggle.width as usize)
            .collect();
        assert!(drawn.starts_with('['));
        assert!(drawn.contains("Dark"));
    }

    #[test]
    fn background_follows_palette() {
        let mut terminal = Terminal::new(TestBackend::new(40, HEADER_HEIGHT)).unwrap();
        let palette = Palette::for_theme(Theme::Dark);
        let mut header = Header::new(Theme::Dark, palette);
        terminal
            .draw(|f| {
                let area = f.area();
                header.render(f, area);
            })
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(0, 1)].bg, palette.surface);
    }
}
