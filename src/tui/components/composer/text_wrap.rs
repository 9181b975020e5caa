//! Pure wrapping helpers and dimensional constants for the Composer.
//!
//! The composer hard-wraps by display width rather than at word boundaries,
//! so every visual line maps to an exact byte range of the buffer and the
//! cursor can be placed without guessing where a wrapper trimmed spaces.

use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// Border (2) + padding (2) consumed horizontally by the input block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// The input never shrinks below one row of text
pub(super) const MIN_VISIBLE_LINES: u16 = 1;
/// Growth cap; past this the input scrolls internally
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from the block edge to the first text column (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
/// Offset from the block edge to the first text row (border)
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// Text width left inside an input block of the given outer width.
pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Split `text` into visual lines of at most `width` columns.
///
/// Returned ranges exclude the `'\n'` that ends a logical line. A line that
/// exactly fills the width at the end of the text is followed by an empty
/// line, which is where the cursor sits after typing the last column.
pub(super) fn visual_lines(text: &str, width: u16) -> Vec<Range<usize>> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut start = 0;
    let mut line_width = 0;

    for (i, c) in text.char_indices() {
        if c == '\n' {
            lines.push(start..i);
            start = i + 1;
            line_width = 0;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if line_width + w > width && line_width > 0 {
            lines.push(start..i);
            start = i;
            line_width = 0;
        }
        line_width += w;
    }
    lines.push(start..text.len());

    if line_width >= width {
        lines.push(text.len()..text.len());
    }
    lines
}

/// Number of visual lines `text` occupies at `width`.
pub(super) fn line_count(text: &str, width: u16) -> u16 {
    u16::try_from(visual_lines(text, width).len()).unwrap_or(u16::MAX)
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices<'a>(text: &'a str, width: u16) -> Vec<&'a str> {
        visual_lines(text, width)
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(slices("", 10), vec![""]);
        assert_eq!(line_count("", 10), 1);
    }

    #[test]
    fn short_text_fits_on_one_line() {
        assert_eq!(slices("hello", 10), vec!["hello"]);
    }

    #[test]
    fn hard_wraps_at_width() {
        assert_eq!(slices("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn keeps_spaces_where_they_fall() {
        assert_eq!(slices("ab cd", 3), vec!["ab ", "cd"]);
    }

    #[test]
    fn newlines_split_lines() {
        assert_eq!(slices("Hi\nthere", 20), vec!["Hi", "there"]);
        assert_eq!(slices("Hi\n", 20), vec!["Hi", ""]);
        assert_eq!(slices("\n\n", 20), vec!["", "", ""]);
    }

    #[test]
    fn full_last_line_gets_a_trailing_empty_line() {
        assert_eq!(slices("abc", 3), vec!["abc", ""]);
        assert_eq!(slices("abcdef", 3), vec!["abc", "def", ""]);
    }

    #[test]
    fn wide_characters_count_double() {
        // Each CJK char is two columns wide
        assert_eq!(slices("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn zero_width_behaves_like_one_column() {
        assert_eq!(slices("ab", 0), vec!["a", "b", ""]);
    }

    #[test]
    fn inner_width_saturates() {
        assert_eq!(inner_width(20), 16);
        assert_eq!(inner_width(3), 0);
    }

    #[test]
    fn char_boundaries_ascii() {
        assert_eq!(prev_char_boundary("abc", 2), 1);
        assert_eq!(prev_char_boundary("abc", 1), 0);
        assert_eq!(next_char_boundary("abc", 0), 1);
        assert_eq!(next_char_boundary("abc", 3), 3);
    }

    #[test]
    fn char_boundaries_multibyte() {
        // "café": 'é' starts at byte 3 and is 2 bytes long
        let s = "café";
        assert_eq!(prev_char_boundary(s, 5), 3);
        assert_eq!(next_char_boundary(s, 3), 5);

        // "a🔥b": the emoji is 4 bytes at offset 1
        let s = "a🔥b";
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(prev_char_boundary(s, 5), 1);
    }
}
