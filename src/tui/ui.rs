use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::header::HEADER_HEIGHT;
use crate::tui::components::{BubbleRegion, Composer, Header, MessageList};
use crate::tui::theme::Palette;

/// Blank columns on each side of the composer.
const COMPOSER_MARGIN: u16 = 1;

/// Where the three parts of the screen land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub list: Rect,
    pub composer: Rect,
}

/// Split the frame into header, message list and composer.
///
/// Shared by drawing and hit testing so clicks always land where things
/// were drawn.
pub fn screen_layout(frame_area: Rect, composer: &Composer) -> ScreenLayout {
    use Constraint::{Length, Min};
    let composer_width = frame_area.width.saturating_sub(COMPOSER_MARGIN * 2);
    let composer_height = composer.calculate_height(composer_width);
    let [header, list, composer_row] =
        Layout::vertical([Length(HEADER_HEIGHT), Min(0), Length(composer_height)])
            .areas(frame_area);
    let composer = composer_row.inner(Margin {
        horizontal: COMPOSER_MARGIN,
        vertical: 0,
    });
    ScreenLayout {
        header,
        list,
        composer,
    }
}

/// What a mouse position points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    ThemeToggle,
    SendButton,
    Message(usize, BubbleRegion),
}

/// Hit test: find the clickable element at screen position (`x`, `y`).
pub fn hit_test(frame_area: Rect, app: &App, tui: &TuiState, x: u16, y: u16) -> Option<Target> {
    let layout = screen_layout(frame_area, &tui.composer);
    let point = ratatui::layout::Position { x, y };

    if Header::toggle_area(app.theme, layout.header).contains(point) {
        return Some(Target::ThemeToggle);
    }
    if tui.composer.layout(layout.composer).send.contains(point) {
        return Some(Target::SendButton);
    }
    tui.message_list
        .hit_test(&app.messages, layout.list, x, y)
        .map(|(index, region)| Target::Message(index, region))
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: Instant, animation_frame: usize) {
    let palette = Palette::for_theme(app.theme);
    let layout = screen_layout(frame.area(), &tui.composer);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        frame.area(),
    );

    Header::new(app.theme, palette).render(frame, layout.header);

    MessageList {
        state: &mut tui.message_list,
        messages: &app.messages,
        palette: &palette,
        time_format: &tui.time_format,
        is_typing: app.is_typing(),
        animation_frame,
        now,
    }
    .render(frame, layout.list);

    tui.composer.palette = palette;
    tui.composer.render(frame, layout.composer);
}
