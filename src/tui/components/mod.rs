//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `Header`: Title, subtitle and the theme toggle
//! - `Bubble`: One message, with its sources and hover footer
//! - `SourceCard`: One citation inside an assistant bubble
//! - `TypingIndicator`: The animated three dots
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `Composer`: Auto-growing text input with a send control
//! - `MessageList`: Scrollable conversation view with layout caching
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (struct fields), not by
//! reaching into `App`. The theme arrives as a `Palette`, so no component
//! branches on light/dark itself.
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! Header::new(app.theme, palette).render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! header.render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (Title bar with theme toggle)
//! ├── bubble.rs        (Single message renderer)
//! ├── source_card.rs   (Citation card)
//! ├── typing.rs        (Typing indicator)
//! ├── message_list.rs  (Scrollable message container)
//! └── composer/        (Text input with send control)
//! ```

pub mod bubble;
pub mod composer;
pub mod header;
pub mod message_list;
pub mod source_card;
pub mod typing;

pub use bubble::{Bubble, BubbleRegion};
pub use composer::{Composer, ComposerEvent};
pub use header::Header;
pub use message_list::{CopyFeedback, MessageList, MessageListState};
