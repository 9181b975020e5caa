//! # Core Application Logic
//!
//! The conversation controller. It knows nothing about any specific UI
//! technology, timers, or the desktop.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (App)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`conversation`]: `Message`, `Source`, seed data, input validation
//! - [`state`]: The `App` struct and its transition functions
//! - [`action`]: The `Action` enum and `update()`
//! - [`config`]: Settings file, env and CLI resolution

pub mod action;
pub mod config;
pub mod conversation;
pub mod state;
