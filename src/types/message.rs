use serde::{Deserialize, Serialize};

/// Role of the author of a chat message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// A message typed by the user.
    User,

    /// A message produced by the agent.
    Agent,

    /// A message injected by the application, such as stored memories.
    System,
}

impl MessageRole {
    /// Returns the lowercase name used when a conversation is flattened to text.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Agent => "agent",
            MessageRole::System => "system",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One part of a message's content.
///
/// Only text parts participate in rerun and compaction; the other kinds are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessagePart {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },

    /// Model reasoning shown separately from the answer.
    Reasoning {
        /// The reasoning text.
        text: String,
    },

    /// A tool call made by the agent, with its serialized input and output.
    ToolInvocation {
        /// Identifier of the tool that was called.
        tool_name: String,
        /// Tool input as JSON.
        input: serde_json::Value,
        /// Tool output as JSON, when the call has completed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<serde_json::Value>,
    },

    /// An attached file.
    File {
        /// MIME type of the file.
        media_type: String,
        /// Location of the file contents.
        url: String,
    },
}

impl MessagePart {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        MessagePart::Text { text: text.into() }
    }

    /// Returns the text if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier of the message.
    pub id: String,

    /// Author of the message.
    pub role: MessageRole,

    /// Ordered content parts.
    pub parts: Vec<MessagePart>,
}

impl Message {
    /// Create a new `Message` with the given id, role and parts.
    pub fn new(id: impl Into<String>, role: MessageRole, parts: Vec<MessagePart>) -> Self {
        Self {
            id: id.into(),
            role,
            parts,
        }
    }

    /// Create a new user `Message` holding a single text part.
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, MessageRole::User, vec![MessagePart::text(text)])
    }

    /// Create a new agent `Message` holding a single text part.
    pub fn agent(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, MessageRole::Agent, vec![MessagePart::text(text)])
    }

    /// Create a new system `Message` holding a single text part.
    pub fn system(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, MessageRole::System, vec![MessagePart::text(text)])
    }

    /// Returns the first text part of this message, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(MessagePart::as_text)
    }
}

/// Returns the first message authored by the user.
///
/// This is the original task of a conversation.
pub fn first_user_message(messages: &[Message]) -> Option<&Message> {
    messages.iter().find(|m| m.role == MessageRole::User)
}
