use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{Content, Part};

/// Speaker of a chat turn, using the role names the Gemini wire expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// A single turn of the conversation
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

/// Append-only in-memory conversation history.
///
/// Created once at startup, passed by mutable reference into the chat
/// backend, and discarded at process exit. Turns are never rewritten or
/// removed.
#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            turns: Vec::new(),
        }
    }

    /// Session identifier, used in log fields
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the session was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn {
            role: Role::User,
            text: text.into(),
        });
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn {
            role: Role::Model,
            text: text.into(),
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the full history as request contents
    pub fn contents(&self) -> Vec<Content> {
        self.turns
            .iter()
            .map(|turn| Content {
                parts: vec![Part::text(turn.text.clone())],
                role: Some(turn.role.as_str().to_string()),
            })
            .collect()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
