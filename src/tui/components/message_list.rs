//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display the messages as bubbles, plus the typing indicator
//! - Manage scrolling and stick-to-bottom
//! - Hit testing for mouse interactions
//! - Perform efficient layout caching (bubble heights)
//! - Track per-message "Copied!" feedback
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the messages (props).
//!
//! Since `Component::render` takes `&mut self`, we can safely mutate the state
//! (including layout cache and scroll state) during the render pass, aligning
//! with Ratatui's `StatefulWidget` pattern.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::Style;
use ratatui::widgets::Block;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::conversation::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::bubble::{Bubble, BubbleRegion};
use crate::tui::components::typing::{TYPING_HEIGHT, TypingIndicator};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Blank columns on each side of the bubbles.
const SIDE_MARGIN: u16 = 1;

/// Width available to a bubble row in a list drawn `area_width` wide.
fn row_width(area_width: u16) -> u16 {
    // -1 for the scrollbar
    area_width.saturating_sub(1).saturating_sub(SIDE_MARGIN * 2)
}

/// Which messages were copied recently, keyed by message id.
///
/// Each entry expires on its own; there is no shared timer. The event loop
/// prunes expired entries and keeps redrawing while any are active.
#[derive(Debug)]
pub struct CopyFeedback {
    duration: Duration,
    copied_at: HashMap<String, Instant>,
}

impl CopyFeedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            copied_at: HashMap::new(),
        }
    }

    /// Start (or restart) the feedback for `id`.
    pub fn mark(&mut self, id: &str, now: Instant) {
        self.copied_at.insert(id.to_string(), now);
    }

    pub fn is_active(&self, id: &str, now: Instant) -> bool {
        self.copied_at
            .get(id)
            .is_some_and(|&at| now.saturating_duration_since(at) < self.duration)
    }

    /// Drop expired entries. Returns `true` if any were removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.copied_at.len();
        let duration = self.duration;
        self.copied_at
            .retain(|_, &mut at| now.saturating_duration_since(at) < duration);
        self.copied_at.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.copied_at.is_empty()
    }
}

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Currently selected message index (hover or keyboard navigation)
    pub selected_index: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    pub copy_feedback: CopyFeedback,
}

impl MessageListState {
    pub fn new(copy_feedback: Duration) -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            selected_index: None,
            viewport_height: 0,
            copy_feedback: CopyFeedback::new(copy_feedback),
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.layout.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected message is fully visible.
    /// If the message is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        if idx >= self.layout.prefix_heights.len() {
            return;
        }

        let item_top = self.layout.top_of(idx);
        let item_bottom = self.layout.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y || item_bottom.saturating_sub(item_top) > self.viewport_height {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
            self.stick_to_bottom = false;
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
            // Re-pin if we've landed at the absolute bottom
            let max_y = self.layout.total_height().saturating_sub(self.viewport_height);
            self.stick_to_bottom = new_y >= max_y;
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.layout.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Select the previous message, or the last one if nothing is selected.
    pub fn select_previous(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let idx = match self.selected_index {
            Some(i) => i.saturating_sub(1).min(count - 1),
            None => count - 1,
        };
        self.selected_index = Some(idx);
        self.scroll_to_selected();
    }

    pub fn select_next(&mut self, count: usize) {
        if let Some(idx) = self.selected_index
            && idx + 1 < count
        {
            self.selected_index = Some(idx + 1);
            self.scroll_to_selected();
        }
    }

    /// Find the message and bubble region under screen position (`x`, `y`)
    /// for a list last drawn into `area`.
    pub fn hit_test(
        &self,
        messages: &[Message],
        area: Rect,
        x: u16,
        y: u16,
    ) -> Option<(usize, BubbleRegion)> {
        let rows_left = area.x + SIDE_MARGIN;
        if !area.contains(Position { x, y }) || x < rows_left {
            return None;
        }

        let content_y = (y - area.y) + self.scroll_state.offset().y;
        let index = self
            .layout
            .prefix_heights
            .partition_point(|&end| end <= content_y);
        let message = messages.get(index)?;
        if index >= self.layout.prefix_heights.len() {
            return None;
        }

        let dy = content_y - self.layout.top_of(index);
        let region = Bubble::region_at(message, row_width(area.width), x - rows_left, dy)?;
        Some((index, region))
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    // Mutable reference to persistent state
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub palette: &'a Palette,
    pub time_format: &'a str,
    pub is_typing: bool,
    pub animation_frame: usize,
    /// Clock reading used to decide which copy feedback is still showing
    pub now: Instant,
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let row_width = row_width(area.width);
        let background = Style::default().bg(self.palette.background);

        // 1. Update Layout Cache (Internal Mutation)
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.messages.len(), row_width);
        layout.heights.truncate(reusable);
        for message in self.messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Bubble::calculate_height(message, row_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(self.messages.len(), row_width);
        layout.trailing = if self.is_typing { TYPING_HEIGHT } else { 0 };

        let messages_height = layout.messages_height();
        let canvas_height = layout.total_height();

        // 2. Clamp scroll offset to prevent overscrolling past content.
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            // Pin before culling so the visible range matches this frame's heights
            let bottom = canvas_height.saturating_sub(area.height);
            self.state.scroll_state.set_offset(Position { x: 0, y: bottom });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        frame.render_widget(Block::default().style(background), area);
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Block::default().style(background),
            Rect::new(0, 0, content_width, canvas_height),
        );

        let mut y_offset = self.state.layout.top_of(visible_range.start);
        for i in visible_range {
            let message = &self.messages[i];
            let height = self.state.layout.heights[i];
            let bubble = Bubble::new(
                message,
                self.palette,
                self.time_format,
                self.state.selected_index == Some(i),
                self.state.copy_feedback.is_active(&message.id, self.now),
            );
            scroll_view.render_widget(bubble, Rect::new(SIDE_MARGIN, y_offset, row_width, height));
            y_offset += height;
        }

        if self.is_typing {
            let typing = TypingIndicator::new(self.palette, self.animation_frame);
            scroll_view.render_widget(
                typing,
                Rect::new(SIDE_MARGIN, messages_height, row_width, TYPING_HEIGHT),
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler is implemented on `MessageListState` rather than `MessageList` because:
/// 1. Event handling requires persistent state (scroll position, stick_to_bottom flag)
/// 2. `MessageList` is recreated each frame with fresh props, so it can't hold state
/// 3. The state object lives in `TuiState` and persists across the event loop
impl EventHandler for MessageListState {
    type Event = (); // Scrolling is handled internally

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            // Mouse hover and clicks need the frame layout; handled by dispatch
            _ => None,
        }
    }
}

/// Cached layout measurements
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    /// Rows after the last message (the typing indicator)
    pub trailing: u16,
    message_count: usize,
    row_width: u16,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many cached heights are still valid.
    ///
    /// Messages never change once appended, so everything cached survives
    /// unless the width changed or the list got shorter.
    pub fn reusable_count(&self, message_count: usize, row_width: u16) -> usize {
        if self.row_width != row_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, row_width: u16) {
        self.message_count = message_count;
        self.row_width = row_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Content row where message `idx` starts.
    pub fn top_of(&self, idx: usize) -> u16 {
        match idx.checked_sub(1) {
            Some(prev) => self.prefix_heights.get(prev).copied().unwrap_or(0),
            None => 0,
        }
    }

    pub fn messages_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn total_height(&self) -> u16 {
        self.messages_height().saturating_add(self.trailing)
    }

    pub fn visible_range(
        &self,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::{Source, SourceKind};
    use crate::core::state::Theme;
    use crate::test_support::test_app;
    use chrono::Local;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const FEEDBACK: Duration = Duration::from_millis(2000);

    fn draw(
        state: &mut MessageListState,
        messages: &[Message],
        is_typing: bool,
        now: Instant,
        width: u16,
        height: u16,
    ) -> Vec<String> {
        let palette = Palette::for_theme(Theme::Light);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                MessageList {
                    state: &mut *state,
                    messages,
                    palette: &palette,
                    time_format: "%H:%M",
                    is_typing,
                    animation_frame: 0,
                    now,
                }
                .render(f, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn copy_feedback_expires_on_its_own() {
        let start = Instant::now();
        let mut feedback = CopyFeedback::new(FEEDBACK);
        feedback.mark("a", start);
        feedback.mark("b", start + Duration::from_millis(1500));

        assert!(feedback.is_active("a", start + Duration::from_millis(1999)));
        assert!(!feedback.is_active("a", start + FEEDBACK));
        assert!(feedback.is_active("b", start + FEEDBACK));
        assert!(!feedback.is_active("c", start));

        assert!(feedback.prune(start + FEEDBACK));
        assert!(!feedback.is_empty());
        assert!(feedback.prune(start + Duration::from_millis(3500)));
        assert!(feedback.is_empty());
        assert!(!feedback.prune(start + Duration::from_secs(10)));
    }

    #[test]
    fn copying_again_restarts_the_feedback() {
        let start = Instant::now();
        let mut feedback = CopyFeedback::new(FEEDBACK);
        feedback.mark("a", start);
        feedback.mark("a", start + Duration::from_millis(1000));
        assert!(feedback.is_active("a", start + Duration::from_millis(2500)));
    }

    #[test]
    fn layout_cache_reuse() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4; 3];
        cache.update_metadata(3, 60);

        assert_eq!(cache.reusable_count(3, 60), 3);
        // Appended message: old heights stay valid
        assert_eq!(cache.reusable_count(4, 60), 3);
        // Resize invalidates everything
        assert_eq!(cache.reusable_count(3, 40), 0);
        // Fewer messages than cached
        assert_eq!(cache.reusable_count(2, 60), 0);
    }

    #[test]
    fn prefix_heights_and_totals() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4, 6, 3];
        cache.rebuild_prefix_heights();
        cache.trailing = TYPING_HEIGHT;
        assert_eq!(cache.prefix_heights, vec![4, 10, 13]);
        assert_eq!(cache.top_of(0), 0);
        assert_eq!(cache.top_of(2), 10);
        assert_eq!(cache.messages_height(), 13);
        assert_eq!(cache.total_height(), 13 + TYPING_HEIGHT);
    }

    #[test]
    fn visible_range_covers_viewport() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![10; 10];
        cache.rebuild_prefix_heights();
        let range = cache.visible_range(50, 10);
        assert!(range.contains(&5));
        assert!(!range.contains(&0));
        assert!(cache.visible_range(0, 10).contains(&0));
    }

    #[test]
    fn renders_seed_conversation_with_sources() {
        let app = test_app();
        let mut state = MessageListState::new(FEEDBACK);
        let rows = draw(&mut state, &app.messages, false, Instant::now(), 80, 60);
        let screen = rows.join("\n");
        assert!(screen.contains("Hello! I'm your Vertex AI Agent."));
        assert!(screen.contains("Sources"));
        assert!(screen.contains("Introduction to Machine"));
        assert_eq!(state.layout.heights.len(), 3);
    }

    #[test]
    fn typing_indicator_follows_the_last_message() {
        let app = test_app();
        let mut state = MessageListState::new(FEEDBACK);
        let rows = draw(&mut state, &app.messages, true, Instant::now(), 80, 60);
        assert!(rows.iter().any(|r| r.contains("● ● ●")));
        assert_eq!(state.layout.trailing, TYPING_HEIGHT);

        let rows = draw(&mut state, &app.messages, false, Instant::now(), 80, 60);
        assert!(rows.iter().all(|r| !r.contains("●")));
        assert_eq!(state.layout.trailing, 0);
    }

    #[test]
    fn copied_label_shows_only_for_marked_message() {
        let messages = vec![
            Message::user("first", Local::now()),
            Message::user("second", Local::now()),
        ];
        let now = Instant::now();
        let mut state = MessageListState::new(FEEDBACK);
        state.copy_feedback.mark(&messages[1].id, now);

        let rows = draw(&mut state, &messages, false, now, 40, 20);
        assert!(rows.iter().all(|r| !r.contains("Copied!")), "hidden until hovered");

        state.selected_index = Some(1);
        let rows = draw(&mut state, &messages, false, now, 40, 20);
        let copied_rows: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.contains("Copied!"))
            .map(|(i, _)| i)
            .collect();
        // Second bubble's footer: 4 rows for the first row, then 3 bubble rows
        assert_eq!(copied_rows, vec![7]);

        let rows = draw(&mut state, &messages, false, now + FEEDBACK, 40, 20);
        assert!(rows.iter().all(|r| !r.contains("Copied!")));
    }

    #[test]
    fn hit_test_finds_bubble_and_source() {
        let sources = vec![
            Source::new("1", "Intro", SourceKind::Article).with_url("https://example.com"),
        ];
        let messages = vec![
            Message::user("Hi", Local::now()),
            Message::assistant("Answer", Local::now(), sources),
        ];
        let mut state = MessageListState::new(FEEDBACK);
        draw(&mut state, &messages, false, Instant::now(), 80, 30);
        let area = Rect::new(0, 0, 80, 30);

        // User bubble: rows 0-2, right-aligned ending at column 78
        assert_eq!(state.hit_test(&messages, area, 76, 1), Some((0, BubbleRegion::Body)));
        assert_eq!(state.hit_test(&messages, area, 5, 1), None);
        // Assistant bubble starts at row 4: border, text, label, card at 7-9
        assert_eq!(state.hit_test(&messages, area, 5, 5), Some((1, BubbleRegion::Body)));
        assert_eq!(
            state.hit_test(&messages, area, 5, 8),
            Some((1, BubbleRegion::Source(0)))
        );
        // Past the content
        assert_eq!(state.hit_test(&messages, area, 5, 25), None);
    }

    #[test]
    fn selection_moves_within_bounds() {
        let mut state = MessageListState::new(FEEDBACK);
        state.select_previous(3);
        assert_eq!(state.selected_index, Some(2));
        state.select_previous(3);
        state.select_previous(3);
        state.select_previous(3);
        assert_eq!(state.selected_index, Some(0));
        state.select_next(3);
        assert_eq!(state.selected_index, Some(1));
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected_index, Some(2));

        let mut empty = MessageListState::new(FEEDBACK);
        empty.select_previous(0);
        empty.select_next(0);
        assert_eq!(empty.selected_index, None);
    }

    #[test]
    fn scrolling_up_unpins_and_scrolling_down_repins() {
        let app = test_app();
        let mut state = MessageListState::new(FEEDBACK);
        draw(&mut state, &app.messages, false, Instant::now(), 80, 10);
        assert!(state.stick_to_bottom);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);

        for _ in 0..200 {
            state.handle_event(&TuiEvent::ScrollDown);
        }
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn pinned_list_stays_visible_after_shrinking() {
        let messages: Vec<Message> = (0..24)
            .map(|i| {
                Message::user(
                    format!("message number {i} with some words to wrap"),
                    Local::now(),
                )
            })
            .collect();
        let now = Instant::now();
        let mut state = MessageListState::new(FEEDBACK);

        draw(&mut state, &messages, false, now, 160, 50);
        draw(&mut state, &messages, false, now, 160, 50);
        let rows = draw(&mut state, &messages, false, now, 40, 30);

        assert!(rows.iter().any(|r| r.contains("message number 23")));
        let filled = rows
            .iter()
            .filter(|r| r.chars().take(38).any(|c| !c.is_whitespace()))
            .count();
        assert!(filled > 10, "only {filled} non-blank rows");
    }
}
