//! Small formatting helpers shared by the message components.

use chrono::{DateTime, Local};
use std::fmt::Write;

use crate::core::conversation::SourceKind;

/// Glyph for sources that live on the web.
pub const EXTERNAL_LINK_ICON: &str = "↗";
/// Glyph for documents and PDFs.
pub const DOCUMENT_ICON: &str = "▤";

/// Format a timestamp as time of day using a strftime pattern.
///
/// Falls back to `HH:MM` if the pattern is invalid.
pub fn format_time(timestamp: &DateTime<Local>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", timestamp.format(pattern)).is_err() {
        return timestamp.format("%H:%M").to_string();
    }
    out
}

/// Icon shown on a source card.
pub fn source_icon(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Article => EXTERNAL_LINK_ICON,
        SourceKind::Document | SourceKind::Pdf => DOCUMENT_ICON,
    }
}
