//! Clipboard and browser access.
//!
//! Both are fire-and-forget from the user's point of view: callers log a
//! failure and move on. The trait exists so event dispatch can be tested
//! without touching the real clipboard or spawning a browser.

use log::debug;
use std::fmt;

#[derive(Debug)]
pub enum DesktopError {
    ClipboardUnavailable(String),
    Clipboard(String),
    Open(std::io::Error),
}

impl fmt::Display for DesktopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesktopError::ClipboardUnavailable(e) => write!(f, "clipboard unavailable: {e}"),
            DesktopError::Clipboard(e) => write!(f, "clipboard write failed: {e}"),
            DesktopError::Open(e) => write!(f, "could not open link: {e}"),
        }
    }
}

impl std::error::Error for DesktopError {}

pub trait Desktop {
    /// Put `text` on the system clipboard, unchanged.
    fn copy_text(&mut self, text: &str) -> Result<(), DesktopError>;

    /// Open `url` in the default browser.
    fn open_url(&mut self, url: &str) -> Result<(), DesktopError>;
}

/// The real desktop: `arboard` for the clipboard, `open` for links.
pub struct SystemDesktop {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemDesktop {
    pub fn new() -> Self {
        // Opened lazily on first copy as well, in case it isn't ready yet
        Self {
            clipboard: arboard::Clipboard::new().ok(),
        }
    }
}

impl Default for SystemDesktop {
    fn default() -> Self {
        Self::new()
    }
}

impl Desktop for SystemDesktop {
    fn copy_text(&mut self, text: &str) -> Result<(), DesktopError> {
        if self.clipboard.is_none() {
            self.clipboard = Some(
                arboard::Clipboard::new()
                    .map_err(|e| DesktopError::ClipboardUnavailable(e.to_string()))?,
            );
        }
        let Some(clipboard) = self.clipboard.as_mut() else {
            return Err(DesktopError::ClipboardUnavailable("not initialised".to_string()));
        };
        clipboard
            .set_text(text)
            .map_err(|e| DesktopError::Clipboard(e.to_string()))?;
        debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }

    fn open_url(&mut self, url: &str) -> Result<(), DesktopError> {
        open::that_detached(url).map_err(DesktopError::Open)?;
        debug!("Opened {url}");
        Ok(())
    }
}
