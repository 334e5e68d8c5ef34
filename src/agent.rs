//! The agent session seam.
//!
//! An [`AgentSession`] owns the message list of the current chat and is its
//! only mutator. It dispatches messages to an agent backend and reports
//! progress through its `is_loading`/`is_submitting` flags rather than through
//! the futures it returns: `send_message` resolves once the request is handed
//! off, not when the reply has arrived.

use crate::error::{Error, Result};
use crate::types::{Chat, Message, MessagePart, MessageRole};

/////////////////////////////////////////// AgentSession ///////////////////////////////////////////

/// Agent behavior expected by the chat page.
#[async_trait::async_trait]
pub trait AgentSession: Send {
    /// Returns the live message list.
    fn messages(&self) -> &[Message];

    /// Replaces the live message list.
    fn set_messages(&mut self, messages: Vec<Message>);

    /// Dispatches `text` as a new user message.
    async fn send_message(&mut self, text: &str) -> Result<()>;

    /// Stops the response currently being produced, if any.
    async fn stop(&mut self) -> Result<()>;

    /// Returns true while a response is being streamed.
    fn is_loading(&self) -> bool;

    /// Returns true while a submission is in flight but not yet streaming.
    fn is_submitting(&self) -> bool;

    /// Marks a submission as in flight.
    fn set_is_submitting(&mut self, submitting: bool);

    /// Returns the id of the message being edited, if any.
    fn editing_message_id(&self) -> Option<&str>;

    /// Returns the content of the edit in progress.
    fn editing_content(&self) -> &str;

    /// Replaces the content of the edit in progress.
    fn set_editing_content(&mut self, content: String);

    /// Begins editing `message_id`, seeding the edit with its first text part.
    fn start_edit(&mut self, message_id: &str);

    /// Abandons the edit in progress.
    fn cancel_edit(&mut self);

    /// Writes the edit in progress back to `message_id`.
    async fn save_edit(&mut self, message_id: &str) -> Result<()>;

    /// Deletes `message_id` from the conversation.
    async fn delete_message(&mut self, message_id: &str) -> Result<()>;

    /// Regenerates the agent reply at `index`.
    async fn regenerate_message(&mut self, index: usize) -> Result<()>;

    /// Returns the index of the message being regenerated, if any.
    fn regenerating_index(&self) -> Option<usize>;

    /// Returns the snapshot of the message list taken when regeneration began.
    fn full_messages_backup(&self) -> &[Message];

    /// Returns the backend session id of the current chat.
    fn current_chat_session_id(&self) -> Option<&str>;

    /// Returns the chat the user is looking at, if one is selected.
    fn current_chat(&self) -> Option<&Chat>;

    /// Returns true when more tools are enabled than the agent handles well.
    fn has_too_many_tools(&self) -> bool;
}

///////////////////////////////////////// LocalAgentSession ////////////////////////////////////////

/// An in-process agent session that answers every message itself.
///
/// It completes each request synchronously with an acknowledgement so that a
/// front end can be exercised without an agent backend. Sending without a
/// selected chat opens a new one. Every dispatched text is also recorded in
/// [`LocalAgentSession::sent`].
#[derive(Debug, Default)]
pub struct LocalAgentSession {
    chat: Option<Chat>,
    messages: Vec<Message>,
    sent: Vec<String>,
    next_id: u64,
    next_chat_id: i64,
    loading: bool,
    submitting: bool,
    editing_message_id: Option<String>,
    editing_content: String,
    regenerating_index: Option<usize>,
    full_messages_backup: Vec<Message>,
    too_many_tools: bool,
    stops: u64,
}

impl LocalAgentSession {
    /// Creates a session with no chat selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session for `chat`.
    pub fn with_chat(chat: Chat) -> Self {
        let mut session = Self::default();
        session.select_chat(Some(chat));
        session
    }

    /// Selects `chat`, or deselects with `None`. The message list is reset.
    pub fn select_chat(&mut self, chat: Option<Chat>) {
        if let Some(chat) = &chat {
            self.next_chat_id = self.next_chat_id.max(chat.id.0);
        }
        self.chat = chat;
        self.messages.clear();
        self.full_messages_backup.clear();
        self.regenerating_index = None;
    }

    /// Sets whether the session reports too many enabled tools.
    pub fn set_too_many_tools(&mut self, too_many: bool) {
        self.too_many_tools = too_many;
    }

    /// Sets the loading flag, as a streaming backend would.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Returns every text dispatched through `send_message`, in order.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Returns how many times `stop` was called.
    pub fn stop_count(&self) -> u64 {
        self.stops
    }

    fn next_message_id(&mut self) -> String {
        self.next_id += 1;
        format!("local-{}", self.next_id)
    }

    fn reply_to(text: &str) -> String {
        let words = text.split_whitespace().count();
        format!("Received your message ({words} words). No agent backend is attached.")
    }
}

#[async_trait::async_trait]
impl AgentSession for LocalAgentSession {
    fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn set_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    async fn send_message(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(Error::agent("refusing to send an empty message"));
        }
        if self.chat.is_none() {
            self.next_chat_id += 1;
            let chat = Chat::new(self.next_chat_id);
            tracing::debug!(chat_id = %chat.id, "created chat for first message");
            self.chat = Some(chat);
        }
        self.sent.push(text.to_string());
        let user_id = self.next_message_id();
        self.messages.push(Message::user(user_id, text));
        let agent_id = self.next_message_id();
        self.messages.push(Message::agent(agent_id, Self::reply_to(text)));
        self.submitting = false;
        self.loading = false;
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.stops += 1;
        self.loading = false;
        self.submitting = false;
        Ok(())
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn set_is_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    fn editing_message_id(&self) -> Option<&str> {
        self.editing_message_id.as_deref()
    }

    fn editing_content(&self) -> &str {
        &self.editing_content
    }

    fn set_editing_content(&mut self, content: String) {
        self.editing_content = content;
    }

    fn start_edit(&mut self, message_id: &str) {
        let Some(message) = self.messages.iter().find(|m| m.id == message_id) else {
            return;
        };
        self.editing_content = message.first_text().unwrap_or_default().to_string();
        self.editing_message_id = Some(message_id.to_string());
    }

    fn cancel_edit(&mut self) {
        self.editing_message_id = None;
        self.editing_content.clear();
    }

    async fn save_edit(&mut self, message_id: &str) -> Result<()> {
        if self.editing_message_id.as_deref() != Some(message_id) {
            return Err(Error::validation(
                "message is not being edited",
                Some(message_id.to_string()),
            ));
        }
        let content = std::mem::take(&mut self.editing_content);
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == message_id) {
            let mut replaced = false;
            for part in message.parts.iter_mut() {
                if let MessagePart::Text { text } = part {
                    *text = content.clone();
                    replaced = true;
                    break;
                }
            }
            if !replaced {
                message.parts.insert(0, MessagePart::text(content));
            }
        }
        self.editing_message_id = None;
        Ok(())
    }

    async fn delete_message(&mut self, message_id: &str) -> Result<()> {
        self.messages.retain(|m| m.id != message_id);
        Ok(())
    }

    async fn regenerate_message(&mut self, index: usize) -> Result<()> {
        let Some(message) = self.messages.get(index) else {
            return Err(Error::validation(
                "no message at index",
                Some(index.to_string()),
            ));
        };
        if message.role != MessageRole::Agent {
            return Err(Error::validation(
                "only agent messages can be regenerated",
                Some(index.to_string()),
            ));
        }
        let prompt = self.messages[..index]
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .and_then(|m| m.first_text())
            .unwrap_or_default()
            .to_string();
        self.full_messages_backup = self.messages.clone();
        self.regenerating_index = Some(index);
        self.messages.truncate(index);
        let agent_id = self.next_message_id();
        self.messages
            .push(Message::agent(agent_id, Self::reply_to(&prompt)));
        self.regenerating_index = None;
        self.full_messages_backup.clear();
        Ok(())
    }

    fn regenerating_index(&self) -> Option<usize> {
        self.regenerating_index
    }

    fn full_messages_backup(&self) -> &[Message] {
        &self.full_messages_backup
    }

    fn current_chat_session_id(&self) -> Option<&str> {
        self.chat.as_ref().and_then(|c| c.session_id.as_deref())
    }

    fn current_chat(&self) -> Option<&Chat> {
        self.chat.as_ref()
    }

    fn has_too_many_tools(&self) -> bool {
        self.too_many_tools
    }
}
