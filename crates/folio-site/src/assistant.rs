//! Placeholder chat assistant.
//!
//! No model is contacted. Replies echo the prompt tagged with the model that
//! would have answered it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message of a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// In-memory conversation log.
#[derive(Debug, Default)]
pub struct ChatHistory {
    messages: Mutex<Vec<ChatMessage>>,
}

impl ChatHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn push(&self, role: Role, text: impl Into<String>) {
        self.lock().push(ChatMessage {
            role,
            text: text.into(),
        });
    }

    /// Copy of all messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Placeholder assistant answering from a fixed template.
#[derive(Clone, Debug)]
pub struct Assistant {
    default_model: String,
}

impl Assistant {
    /// Create an assistant that falls back to `default_model`.
    #[must_use]
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            default_model: default_model.into(),
        }
    }

    /// Reply to `prompt`.
    ///
    /// `model` picks the answering model; `None` or a blank name selects the
    /// default.
    ///
    /// # Example
    ///
    /// ```
    /// use folio_site::Assistant;
    ///
    /// let assistant = Assistant::new("Gemini");
    /// assert_eq!(assistant.reply(None, "hi"), "[Model: Gemini] You said: hi");
    /// assert_eq!(assistant.reply(Some("Claude"), "hi"), "[Model: Claude] You said: hi");
    /// ```
    #[must_use]
    pub fn reply(&self, model: Option<&str>, prompt: &str) -> String {
        let chosen = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_model);
        format!("[Model: {chosen}] You said: {prompt}")
    }

    /// Reply to `prompt` and record both sides in `history`.
    pub fn converse(&self, history: &ChatHistory, model: Option<&str>, prompt: &str) -> String {
        let reply = self.reply(model, prompt);
        history.push(Role::User, prompt);
        history.push(Role::Assistant, reply.clone());
        reply
    }
}
