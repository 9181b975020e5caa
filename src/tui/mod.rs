//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates terminal events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (typing indicator, "Copied!" feedback): draws every ~80ms so
//!   the dots move and feedback disappears on time.
//! - **Idle**: sleeps up to 500ms, only redraws on events, replies or terminal
//!   resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
pub mod components;
pub mod desktop;
pub mod dispatch;
pub mod event;
pub mod format;
pub mod scheduler;
pub mod theme;
pub mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::components::{Composer, MessageListState};
use crate::tui::desktop::SystemDesktop;
use crate::tui::event::{poll_event_immediate, poll_event_timeout};
use crate::tui::scheduler::ReplyScheduler;
use crate::tui::theme::Palette;

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);
/// Typing dots advance at roughly this pace
const DOT_STEP: Duration = Duration::from_millis(400);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate messages with arrow keys. Typing auto-switches to Input.
    Cursor,
    /// Text editing in the composer. Esc switches to Cursor.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub composer: Composer,
    // Modal input mode
    pub input_mode: InputMode,
    /// strftime pattern for bubble timestamps
    pub time_format: String,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            message_list: MessageListState::new(config.copy_feedback),
            composer: Composer::new(Palette::for_theme(config.theme)),
            input_mode: InputMode::Input, // User expects to type immediately
            time_format: config.time_format.clone(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable Kitty keyboard protocol unconditionally (allows Shift+Enter detection)
        // Detection via supports_keyboard_enhancement() fails in WSL, but the protocol
        // is harmlessly ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Run the chat UI until the user quits. Must be called inside a tokio
/// runtime; reply timers are spawned onto it.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&config);
    let mut desktop = SystemDesktop::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from reply timers
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut scheduler = ReplyScheduler::new(config.reply_delay, tx);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        tui.composer.dimmed = matches!(tui.input_mode, InputMode::Cursor);

        let now = Instant::now();
        if tui.message_list.copy_feedback.prune(now) {
            needs_redraw = true;
        }
        let animating = app.is_typing() || !tui.message_list.copy_feedback.is_empty();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let animation_frame =
                (start_time.elapsed().as_millis() / DOT_STEP.as_millis()) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now, animation_frame)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating, long when idle
        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let frame_area = terminal.get_frame().area();
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let now = Instant::now();
            match dispatch::handle_event(&mut app, &mut tui, event, frame_area, &mut desktop, now) {
                Effect::ScheduleReply => scheduler.schedule(),
                Effect::Quit => should_quit = true,
                Effect::None => {}
            }
        }

        if should_quit {
            break Ok(());
        }

        // Handle reply timers that fired
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::ScheduleReply {
                scheduler.schedule();
            }
        }
    };

    scheduler.cancel_all();
    info!("Shutting down with {} message(s)", app.messages.len());

    ratatui::restore();
    result
}
