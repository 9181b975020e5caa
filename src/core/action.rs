//! # Actions
//!
//! Everything that changes the conversation becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The reply timer fires? That's `Action::ReplyArrived`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! adapter has to carry out. No I/O happens here; timers, clipboard and the
//! browser are the TUI's business.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The composer emitted text (already trimmed, but re-checked here).
    Submit(String),
    /// A simulated reply timer fired.
    ReplyArrived,
    ToggleTheme,
    Quit,
}

/// Work the adapter must do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start one reply timer.
    ScheduleReply,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Submit(text) => app.submit_user_message(&text),
        Action::ReplyArrived => app.receive_assistant_reply(),
        Action::ToggleTheme => {
            app.toggle_theme();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Theme;
    use crate::test_support::test_app;

    #[test]
    fn submit_then_reply_round() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::Submit("Hi".to_string())),
            Effect::ScheduleReply
        );
        assert!(app.is_typing());
        assert_eq!(update(&mut app, Action::ReplyArrived), Effect::None);
        assert!(!app.is_typing());
        assert_eq!(app.messages.len(), 5);
    }

    #[test]
    fn whitespace_submit_has_no_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Submit(" \n ".to_string())), Effect::None);
        assert_eq!(app.messages.len(), 3);
    }

    #[test]
    fn toggle_theme_action() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ToggleTheme), Effect::None);
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(app.messages.len(), 3);
    }

    #[test]
    fn quit_action() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
