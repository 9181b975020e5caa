//! Cursor position tracking and navigation for the Composer.
//!
//! `CursorState` owns the cursor byte offset, scroll offset, and cached
//! width. The text itself is owned by `Composer` and passed in explicitly.

use super::text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, inner_width, prev_char_boundary,
    visual_lines,
};
use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible visual line (0 when content fits)
    pub scroll_offset: u16,
    /// Outer width of the input block at the last render
    pub last_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Back to the start of an empty buffer.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Visual (row, column) of the cursor for an input block `outer_width` wide.
    pub fn row_col(&self, buffer: &str, outer_width: u16) -> (usize, u16) {
        let lines = visual_lines(buffer, inner_width(outer_width));
        let row = lines
            .iter()
            .rposition(|line| line.start <= self.pos)
            .unwrap_or(0);
        let start = lines[row].start.min(self.pos);
        let col = u16::try_from(buffer[start..self.pos].width()).unwrap_or(u16::MAX);
        (row, col)
    }

    /// Move up (`direction < 0`) or down one visual line, keeping the column
    /// as close as the target line allows.
    ///
    /// Returns `true` if the cursor moved, `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, outer_width: u16) -> bool {
        let lines = visual_lines(buffer, inner_width(outer_width));
        let (row, col) = self.row_col(buffer, outer_width);

        let target = if direction < 0 {
            match row.checked_sub(1) {
                Some(r) => r,
                None => return false,
            }
        } else if row + 1 < lines.len() {
            row + 1
        } else {
            return false;
        };

        let line = lines[target].clone();
        let mut pos = line.start;
        let mut width = 0u16;
        for (i, c) in buffer[line.clone()].char_indices() {
            let w = u16::try_from(c.width().unwrap_or(0)).unwrap_or(0);
            if width + w > col {
                break;
            }
            width += w;
            pos = line.start + i + c.len_utf8();
        }

        // The end of a soft-wrapped line is the start of the next one;
        // stay on the target line instead of jumping past it.
        let soft_wrapped = lines
            .get(target + 1)
            .is_some_and(|next| next.start == line.end);
        if soft_wrapped && pos == line.end && pos > line.start {
            pos = prev_char_boundary(buffer, pos);
        }

        self.pos = pos;
        true
    }

    /// Keep the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, outer_width: u16) {
        let total = visual_lines(buffer, inner_width(outer_width)).len();
        if total <= usize::from(MAX_VISIBLE_LINES) {
            self.scroll_offset = 0;
            return;
        }

        let (row, _) = self.row_col(buffer, outer_width);
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row - (MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen position (column, row) of the cursor inside the input block.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let (row, col) = self.row_col(buffer, area.width);
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        let max_col = inner_width(area.width).saturating_sub(1);
        (
            area.x + CONTENT_OFFSET_X + col.min(max_col),
            area.y + CONTENT_OFFSET_Y + row.saturating_sub(self.scroll_offset),
        )
    }
}
