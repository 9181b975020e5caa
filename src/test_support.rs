//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::config::ResolvedConfig;
use crate::core::state::{App, ReplyPolicy, Theme};
use crate::tui::TuiState;
use crate::tui::desktop::{Desktop, DesktopError};

/// Records what the UI asked the desktop to do instead of doing it.
#[derive(Default)]
pub struct RecordingDesktop {
    pub copied: Vec<String>,
    pub opened: Vec<String>,
    /// When set, every request fails (after being recorded).
    pub fail: bool,
}

impl Desktop for RecordingDesktop {
    fn copy_text(&mut self, text: &str) -> Result<(), DesktopError> {
        self.copied.push(text.to_string());
        if self.fail {
            Err(DesktopError::ClipboardUnavailable("test".to_string()))
        } else {
            Ok(())
        }
    }

    fn open_url(&mut self, url: &str) -> Result<(), DesktopError> {
        self.opened.push(url.to_string());
        if self.fail {
            Err(DesktopError::Open(std::io::Error::other("test")))
        } else {
            Ok(())
        }
    }
}

/// Creates a test App with the seed conversation and default settings.
pub fn test_app() -> App {
    App::new(Theme::Light, ReplyPolicy::Queue)
}

/// Creates TUI state with default config (light theme, 2s copy feedback).
pub fn test_tui() -> TuiState {
    TuiState::new(&ResolvedConfig::default())
}
