//! # Conversation Data
//!
//! Messages and the citations ("sources") attached to assistant replies.
//!
//! ```text
//! Message
//! ├── id: String                  // unique, stable for the session
//! ├── text: String                // verbatim, copied as-is on click
//! ├── is_user: bool               // user vs assistant
//! ├── timestamp: DateTime<Local>
//! └── sources: Vec<Source>        // assistant-only, may be empty
//! ```
//!
//! Messages are immutable once built. The conversation only ever grows by
//! appending, which the message list relies on for its layout cache.

use chrono::{DateTime, Local};

/// Kind of material a source points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Article,
    Document,
    Pdf,
}

impl SourceKind {
    /// Lowercase label shown on source cards.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Article => "article",
            SourceKind::Document => "document",
            SourceKind::Pdf => "pdf",
        }
    }
}

/// A citation attached to an assistant message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub kind: SourceKind,
    pub description: Option<String>,
}

impl Source {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            kind,
            description: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Local>,
    pub sources: Vec<Source>,
}

impl Message {
    /// A user message with a fresh id.
    pub fn user(text: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            id: new_message_id(),
            text: text.into(),
            is_user: true,
            timestamp,
            sources: Vec::new(),
        }
    }

    /// An assistant message with a fresh id and the given citations.
    pub fn assistant(
        text: impl Into<String>,
        timestamp: DateTime<Local>,
        sources: Vec<Source>,
    ) -> Self {
        Self {
            id: new_message_id(),
            text: text.into(),
            is_user: false,
            timestamp,
            sources,
        }
    }

    /// Sources that should actually be displayed.
    ///
    /// Citations are an assistant-only concept: a user message never shows
    /// a sources section, whatever it carries.
    pub fn visible_sources(&self) -> &[Source] {
        if self.is_user { &[] } else { &self.sources }
    }
}

fn new_message_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Returns the trimmed text if it is worth submitting, `None` otherwise.
///
/// This is the single validation rule for the composer: it decides both
/// whether the send control is enabled and whether a submit goes through.
pub fn submittable(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// ============================================================================
// Canned content
// ============================================================================

const GREETING: &str = "Hello! I'm your Vertex AI Agent. How can I help you today?";
const SEED_QUESTION: &str = "Hi there! Can you help me understand how machine learning works?";
const SEED_ANSWER: &str = "I'd be happy to help! Machine learning is a subset of artificial \
    intelligence that enables computers to learn and make decisions from data without being \
    explicitly programmed for every scenario. It works by identifying patterns in large datasets \
    and using those patterns to make predictions or decisions about new, unseen data.";

/// Text of every simulated assistant reply.
pub const CANNED_REPLY: &str = "I understand your question. Let me provide you with a helpful \
    response based on what you've asked.";

/// The conversation every session starts with.
pub fn seed_conversation(now: DateTime<Local>) -> Vec<Message> {
    vec![
        Message {
            id: "seed-1".to_string(),
            text: GREETING.to_string(),
            is_user: false,
            timestamp: now,
            sources: Vec::new(),
        },
        Message {
            id: "seed-2".to_string(),
            text: SEED_QUESTION.to_string(),
            is_user: true,
            timestamp: now,
            sources: Vec::new(),
        },
        Message {
            id: "seed-3".to_string(),
            text: SEED_ANSWER.to_string(),
            is_user: false,
            timestamp: now,
            sources: vec![
                Source::new("1", "Introduction to Machine Learning", SourceKind::Article)
                    .with_url("https://example.com/ml-intro")
                    .with_description(
                        "A comprehensive guide to understanding machine learning \
                         fundamentals and applications.",
                    ),
                Source::new("2", "Machine Learning Research Paper", SourceKind::Pdf)
                    .with_description("Academic paper on modern ML techniques and methodologies."),
            ],
        },
    ]
}

/// The simulated assistant reply.
pub fn canned_reply(now: DateTime<Local>) -> Message {
    Message::assistant(
        CANNED_REPLY,
        now,
        vec![
            Source::new("3", "Related Documentation", SourceKind::Document)
                .with_url("https://example.com/docs")
                .with_description("Official documentation covering this topic in detail."),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submittable_trims_surrounding_whitespace() {
        assert_eq!(submittable("  hello \n"), Some("hello"));
    }

    #[test]
    fn submittable_rejects_blank_input() {
        assert_eq!(submittable(""), None);
        assert_eq!(submittable("   "), None);
        assert_eq!(submittable("\n\t \n"), None);
    }

    #[test]
    fn submittable_keeps_inner_newlines() {
        assert_eq!(submittable("Hi\nthere\n"), Some("Hi\nthere"));
    }

    #[test]
    fn seed_has_greeting_question_and_cited_answer() {
        let seed = seed_conversation(Local::now());
        assert_eq!(seed.len(), 3);
        assert!(!seed[0].is_user);
        assert!(seed[1].is_user);
        assert!(!seed[2].is_user);
        assert_eq!(seed[2].sources.len(), 2);
        assert_eq!(seed[2].sources[0].kind, SourceKind::Article);
        assert!(seed[2].sources[0].url.is_some());
        assert_eq!(seed[2].sources[1].kind, SourceKind::Pdf);
        assert!(seed[2].sources[1].url.is_none());
    }

    #[test]
    fn seed_ids_are_unique() {
        let seed = seed_conversation(Local::now());
        assert_ne!(seed[0].id, seed[1].id);
        assert_ne!(seed[1].id, seed[2].id);
    }

    #[test]
    fn canned_reply_cites_one_document() {
        let reply = canned_reply(Local::now());
        assert!(!reply.is_user);
        assert_eq!(reply.text, CANNED_REPLY);
        assert_eq!(reply.sources.len(), 1);
        assert_eq!(reply.sources[0].kind, SourceKind::Document);
        assert_eq!(reply.sources[0].url.as_deref(), Some("https://example.com/docs"));
    }

    #[test]
    fn fresh_messages_get_distinct_ids() {
        let now = Local::now();
        assert_ne!(Message::user("a", now).id, Message::user("a", now).id);
    }

    #[test]
    fn user_messages_never_expose_sources() {
        let mut message = Message::user("look", Local::now());
        message.sources.push(Source::new("x", "Sneaky", SourceKind::Article));
        assert!(message.visible_sources().is_empty());
    }

    #[test]
    fn assistant_messages_expose_their_sources() {
        let reply = canned_reply(Local::now());
        assert_eq!(reply.visible_sources().len(), 1);
    }

    #[test]
    fn kind_labels_are_lowercase() {
        assert_eq!(SourceKind::Article.label(), "article");
        assert_eq!(SourceKind::Document.label(), "document");
        assert_eq!(SourceKind::Pdf.label(), "pdf");
    }
}
