//! Turns terminal events into controller actions and UI state changes.
//!
//! Kept apart from the event loop so the whole input model (modes, mouse
//! targets, clipboard and link side effects) can be driven from tests with a
//! recording [`Desktop`].

use std::time::Instant;

use log::{debug, info, warn};
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{BubbleRegion, ComposerEvent};
use crate::tui::desktop::Desktop;
use crate::tui::event::TuiEvent;
use crate::tui::ui::{self, Target};
use crate::tui::{InputMode, TuiState};

/// Apply one event. The returned effect is for the event loop to carry out.
pub fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    frame_area: Rect,
    desktop: &mut dyn Desktop,
    now: Instant,
) -> Effect {
    match event {
        // Resize just needs a redraw
        TuiEvent::Resize => Effect::None,
        // ForceQuit (Ctrl+C) always quits regardless of mode
        TuiEvent::ForceQuit => update(app, Action::Quit),
        TuiEvent::ToggleTheme => update(app, Action::ToggleTheme),

        // Mouse hover: a miss clears the hover, but never the cursor-mode selection
        TuiEvent::MouseMove(x, y) => {
            match ui::hit_test(frame_area, app, tui, x, y) {
                Some(Target::Message(index, _)) => tui.message_list.selected_index = Some(index),
                _ if tui.input_mode == InputMode::Input => tui.message_list.selected_index = None,
                _ => {}
            }
            Effect::None
        }

        TuiEvent::MouseClick(x, y) => match ui::hit_test(frame_area, app, tui, x, y) {
            Some(Target::ThemeToggle) => update(app, Action::ToggleTheme),
            Some(Target::SendButton) => {
                tui.input_mode = InputMode::Input;
                match tui.composer.take_submission() {
                    Some(text) => update(app, Action::Submit(text)),
                    None => Effect::None,
                }
            }
            Some(Target::Message(index, BubbleRegion::Body)) => {
                tui.message_list.selected_index = Some(index);
                copy_message(app, tui, index, desktop, now);
                Effect::None
            }
            Some(Target::Message(index, BubbleRegion::Source(n))) => {
                tui.message_list.selected_index = Some(index);
                open_source(app, index, n, desktop);
                Effect::None
            }
            None => Effect::None,
        },

        // Scroll events always go to the MessageList regardless of mode
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            Effect::None
        }

        _ => match tui.input_mode {
            InputMode::Input => handle_input_mode(app, tui, &event),
            InputMode::Cursor => handle_cursor_mode(app, tui, &event, desktop, now),
        },
    }
}

fn handle_input_mode(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    // Esc → switch to Cursor mode with the newest message selected
    if matches!(event, TuiEvent::Escape) {
        enter_cursor_mode(app, tui);
        return Effect::None;
    }

    match tui.composer.handle_event(event) {
        Some(ComposerEvent::Submit(text)) => update(app, Action::Submit(text)),
        Some(ComposerEvent::ContentChanged) | None => Effect::None,
    }
}

fn handle_cursor_mode(
    app: &mut App,
    tui: &mut TuiState,
    event: &TuiEvent,
    desktop: &mut dyn Desktop,
    now: Instant,
) -> Effect {
    let count = app.messages.len();
    match event {
        TuiEvent::Escape => leave_cursor_mode(tui),
        TuiEvent::CursorUp => tui.message_list.select_previous(count),
        TuiEvent::CursorDown => tui.message_list.select_next(count),
        TuiEvent::Submit | TuiEvent::InputChar('c' | 'y') => {
            if let Some(index) = tui.message_list.selected_index {
                copy_message(app, tui, index, desktop, now);
            }
        }
        TuiEvent::InputChar(d @ '1'..='9') => {
            if let Some(index) = tui.message_list.selected_index
                && let Some(n) = d.to_digit(10)
            {
                open_source(app, index, n as usize - 1, desktop);
            }
        }
        // Typing auto-switches to Input mode and forwards the event
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
            leave_cursor_mode(tui);
            tui.composer.handle_event(event);
        }
        _ => {}
    }
    Effect::None
}

fn enter_cursor_mode(app: &App, tui: &mut TuiState) {
    tui.input_mode = InputMode::Cursor;
    tui.message_list.selected_index = app.messages.len().checked_sub(1);
    tui.message_list.scroll_to_selected();
    debug!("Cursor mode");
}

fn leave_cursor_mode(tui: &mut TuiState) {
    tui.input_mode = InputMode::Input;
    tui.message_list.selected_index = None;
}

/// Copy a message's text verbatim and start its "Copied!" feedback.
///
/// The feedback shows even if the clipboard refused the text; the failure
/// only goes to the log.
fn copy_message(app: &App, tui: &mut TuiState, index: usize, desktop: &mut dyn Desktop, now: Instant) {
    let Some(message) = app.messages.get(index) else {
        return;
    };
    match desktop.copy_text(&message.text) {
        Ok(()) => info!("Copied message {}", message.id),
        Err(e) => warn!("Failed to copy message {}: {}", message.id, e),
    }
    tui.message_list.copy_feedback.mark(&message.id, now);
}

/// Open the `n`-th visible source of a message, if it has a URL.
fn open_source(app: &App, index: usize, n: usize, desktop: &mut dyn Desktop) {
    let Some(source) = app
        .messages
        .get(index)
        .and_then(|m| m.visible_sources().get(n))
    else {
        return;
    };
    let Some(url) = source.url.as_deref() else {
        debug!("Source '{}' has no link", source.title);
        return;
    };
    if let Err(e) = desktop.open_url(url) {
        warn!("Failed to open {}: {}", url, e);
    }
}
