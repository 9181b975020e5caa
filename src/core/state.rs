//! # Application State
//!
//! The conversation controller. Owns everything the chat screen shows;
//! presentation-only state (scroll, hover, copy feedback) lives in `tui`.
//!
//! ```text
//! App
//! ├── messages: Vec<Message>       // append-only, arrival order
//! ├── theme: Theme                 // light / dark
//! ├── reply_policy: ReplyPolicy    // how overlapping replies are handled
//! └── pending_replies: usize       // simulated replies still owed
//! ```
//!
//! The typing indicator is derived: it is on exactly while a reply is owed.
//! State changes only happen through the transition functions below (or
//! `update(state, action)` in action.rs, which dispatches to them).

use chrono::Local;
use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::action::Effect;
use crate::core::config::ResolvedConfig;
use crate::core::conversation::{self, Message};

/// Binary presentation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

/// What happens when the user submits again while a reply is still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReplyPolicy {
    /// One reply timer at a time; later submissions wait their turn.
    #[default]
    Queue,
    /// Every submission starts its own timer immediately.
    Concurrent,
}

pub struct App {
    pub messages: Vec<Message>,
    pub theme: Theme,
    pub reply_policy: ReplyPolicy,
    /// Replies owed to the user. Under `Queue`, only one of them has a
    /// running timer; under `Concurrent`, all of them do.
    pub pending_replies: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Theme::default(), ReplyPolicy::default())
    }
}

impl App {
    pub fn new(theme: Theme, reply_policy: ReplyPolicy) -> Self {
        Self {
            messages: conversation::seed_conversation(Local::now()),
            theme,
            reply_policy,
            pending_replies: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.theme, config.reply_policy)
    }

    /// Whether the typing indicator is shown.
    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    /// Append a user message and owe them a reply.
    ///
    /// Blank input is ignored. Returns `Effect::ScheduleReply` when a new
    /// reply timer has to be started.
    pub fn submit_user_message(&mut self, text: &str) -> Effect {
        let Some(text) = conversation::submittable(text) else {
            debug!("Ignoring blank submission");
            return Effect::None;
        };

        self.messages.push(Message::user(text, Local::now()));
        let already_waiting = self.is_typing();
        self.pending_replies += 1;
        info!(
            "User message appended ({} total, {} replies pending)",
            self.messages.len(),
            self.pending_replies
        );

        match self.reply_policy {
            ReplyPolicy::Queue if already_waiting => Effect::None,
            _ => Effect::ScheduleReply,
        }
    }

    /// Append the simulated assistant reply.
    ///
    /// A reply that nobody is waiting for is dropped. Under `Queue`, returns
    /// `Effect::ScheduleReply` while more replies are owed.
    pub fn receive_assistant_reply(&mut self) -> Effect {
        if self.pending_replies == 0 {
            warn!("Assistant reply arrived with nothing pending, dropping it");
            return Effect::None;
        }

        self.messages.push(conversation::canned_reply(Local::now()));
        self.pending_replies -= 1;
        info!(
            "Assistant reply appended ({} total, {} replies pending)",
            self.messages.len(),
            self.pending_replies
        );

        match self.reply_policy {
            ReplyPolicy::Queue if self.is_typing() => Effect::ScheduleReply,
            _ => Effect::None,
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        debug!("Theme switched to {}", self.theme.label());
    }
}
