//! The chat page orchestrator.
//!
//! [`ChatPage`] composes the agent session, the stores and the input
//! controller. It owns the transient input state; messages belong to the agent
//! session and drafts to the draft store, and the page only changes either
//! through their traits.
//!
//! When no chat is selected the page is in its empty state: the input is
//! disabled, every input operation is inert, and only suggested prompts can be
//! sent.

use crate::agent::AgentSession;
use crate::chat::commands::SlashCommand;
use crate::chat::config::ChatConfig;
use crate::chat::debounce::DraftDebouncer;
use crate::chat::input::{ChatInputController, InputAction, KeyPress};
use crate::chat::prompts::{summarization_request, tool_restricted_message};
use crate::error::Result;
use crate::observability::{
    PAGE_CLEARS, PAGE_COMPACTIONS, PAGE_PROMPT_SELECTS, PAGE_RERUNS, PAGE_SUBMITS,
    PAGE_SUBMITS_RESTRICTED,
};
use crate::stores::{DraftStore, ModelStore, ToolsStore};
use crate::types::{ChatId, Message, first_user_message};

////////////////////////////////////////////// Stores //////////////////////////////////////////////

/// The stores a chat page reads and writes.
pub struct ChatStores {
    /// Per-chat drafts.
    pub drafts: Box<dyn DraftStore>,

    /// The active tool set.
    pub tools: Box<dyn ToolsStore>,

    /// The selected model.
    pub models: Box<dyn ModelStore>,
}

impl ChatStores {
    /// Bundles the given stores.
    pub fn new(
        drafts: impl DraftStore + 'static,
        tools: impl ToolsStore + 'static,
        models: impl ModelStore + 'static,
    ) -> Self {
        Self {
            drafts: Box::new(drafts),
            tools: Box::new(tools),
            models: Box::new(models),
        }
    }
}

////////////////////////////////////////////// Surface /////////////////////////////////////////////

/// Which variant of the page is shown.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChatSurface {
    /// A chat is selected and the input is live.
    Active {
        /// The selected chat.
        chat_id: ChatId,
    },

    /// No chat is selected; the input is disabled.
    NoChat,
}

/// Progress of the current exchange, as shown by the input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChatStatus {
    /// Nothing in flight.
    Ready,

    /// A message was submitted and the reply has not started.
    Submitted,

    /// The reply is streaming in.
    Streaming,
}

/// Everything a renderer needs to draw the chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    /// The text in the input.
    pub input: String,
    /// The placeholder hint.
    pub placeholder: String,
    /// Whether submission is disabled.
    pub disabled: bool,
    /// Whether the rerun control is disabled.
    pub rerun_disabled: bool,
    /// Whether a reply is streaming.
    pub is_loading: bool,
    /// Whether a submission is being prepared.
    pub is_preparing: bool,
    /// Whether a submission is in flight.
    pub is_submitting: bool,
    /// Whether the chat has any messages.
    pub has_messages: bool,
    /// Progress of the current exchange.
    pub status: ChatStatus,
    /// Commands offered for completion, when the panel is open.
    pub autocomplete: Option<Vec<SlashCommand>>,
    /// Whether the input is exactly a command.
    pub highlight: bool,
}

impl InputView {
    fn inert(placeholder: &str) -> Self {
        Self {
            input: String::new(),
            placeholder: placeholder.to_string(),
            disabled: true,
            rerun_disabled: true,
            is_loading: false,
            is_preparing: false,
            is_submitting: false,
            has_messages: false,
            status: ChatStatus::Ready,
            autocomplete: None,
            highlight: false,
        }
    }
}

///////////////////////////////////////////// ChatPage /////////////////////////////////////////////

/// Orchestrates drafts, commands and submission for the current chat.
pub struct ChatPage<A: AgentSession> {
    agent: A,
    stores: ChatStores,
    config: ChatConfig,
    input: ChatInputController,
    debouncer: DraftDebouncer,
}

impl<A: AgentSession> ChatPage<A> {
    /// Creates a page over `agent` and `stores`.
    pub fn new(agent: A, stores: ChatStores, config: ChatConfig) -> Self {
        let input = ChatInputController::new(config.placeholder_examples.clone());
        let debouncer = DraftDebouncer::new(config.debounce_delay);
        let mut page = Self {
            agent,
            stores,
            config,
            input,
            debouncer,
        };
        page.sync_input();
        page
    }

    /// Starts the placeholder rotation. Call from within a tokio runtime.
    pub fn mount(&mut self) {
        self.input.mount(self.config.placeholder_interval);
    }

    /// Stops every timer the page owns.
    pub fn unmount(&mut self) {
        self.input.unmount();
        self.debouncer.cancel();
    }

    /// Returns the agent session.
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Returns the agent session for mutation, e.g. to switch chats.
    ///
    /// Call [`ChatPage::refresh`] afterwards.
    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }

    /// Returns the stores.
    pub fn stores(&self) -> &ChatStores {
        &self.stores
    }

    /// Returns the stores for mutation, e.g. to select a model.
    pub fn stores_mut(&mut self) -> &mut ChatStores {
        &mut self.stores
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns the input controller.
    pub fn input(&self) -> &ChatInputController {
        &self.input
    }

    /// Returns the debouncer.
    pub fn debouncer(&self) -> &DraftDebouncer {
        &self.debouncer
    }

    /// Re-reads the draft of the current chat into the input.
    pub fn refresh(&mut self) {
        self.sync_input();
    }

    /// Returns which variant of the page is shown.
    pub fn surface(&self) -> ChatSurface {
        match self.agent.current_chat() {
            Some(chat) => ChatSurface::Active { chat_id: chat.id },
            None => ChatSurface::NoChat,
        }
    }

    fn active_chat(&self) -> Option<ChatId> {
        match self.surface() {
            ChatSurface::Active { chat_id } => Some(chat_id),
            ChatSurface::NoChat => None,
        }
    }

    /// Returns the draft of the current chat, or the empty string.
    pub fn current_input(&self) -> String {
        match self.active_chat() {
            Some(chat_id) => self.stores.drafts.get_draft_message(chat_id),
            None => String::new(),
        }
    }

    fn sync_input(&mut self) {
        let current = self.current_input();
        if current != self.input.input() {
            self.input.set_input(current);
        }
    }

    ///////////////////////////////////////// derived flags ////////////////////////////////////////

    /// True when submission is not allowed.
    ///
    /// Submission needs non-blank input, no reply streaming, no submission in
    /// flight, and a selected model.
    pub fn is_submitting_disabled(&self) -> bool {
        self.current_input().trim().is_empty()
            || self.agent.is_loading()
            || self.agent.is_submitting()
            || !self.stores.models.has_selected_model()
    }

    /// True while a message is regenerating or a reply is streaming.
    pub fn is_regenerating(&self) -> bool {
        self.agent.regenerating_index().is_some() || self.agent.is_loading()
    }

    /// True while a submission is in flight and nothing is streaming yet.
    pub fn is_preparing(&self) -> bool {
        self.agent.is_submitting() && !self.is_regenerating()
    }

    /// True when the rerun control is disabled.
    pub fn is_rerun_disabled(&self) -> bool {
        self.agent.is_loading() || self.agent.is_submitting()
    }

    /// True when the chat has no messages.
    pub fn is_chat_empty(&self) -> bool {
        self.agent.messages().is_empty()
    }

    /// True when the suggested prompts are shown instead of the history.
    pub fn shows_suggestions(&self) -> bool {
        self.surface() == ChatSurface::NoChat || self.is_chat_empty()
    }

    /// Returns the prompts offered by the empty state.
    pub fn suggested_prompts(&self) -> &[String] {
        &self.config.suggested_prompts
    }

    /// Returns the progress of the current exchange.
    pub fn status(&self) -> ChatStatus {
        if self.is_preparing() {
            ChatStatus::Submitted
        } else if self.agent.is_loading() {
            ChatStatus::Streaming
        } else {
            ChatStatus::Ready
        }
    }

    /// Returns the messages to show.
    ///
    /// While a message regenerates, the snapshot taken before regeneration is
    /// shown instead of the truncated live list.
    pub fn display_messages(&self) -> &[Message] {
        let backup = self.agent.full_messages_backup();
        if self.agent.regenerating_index().is_some() && !backup.is_empty() {
            backup
        } else {
            self.agent.messages()
        }
    }

    /// Returns the state of the input for rendering.
    pub fn input_view(&self) -> InputView {
        if self.surface() == ChatSurface::NoChat {
            return InputView::inert(self.input.placeholder());
        }
        let commands = self.input.commands();
        InputView {
            input: self.current_input(),
            placeholder: self.input.placeholder().to_string(),
            disabled: self.is_submitting_disabled(),
            rerun_disabled: self.is_rerun_disabled(),
            is_loading: self.agent.is_loading(),
            is_preparing: self.is_preparing(),
            is_submitting: self.agent.is_submitting(),
            has_messages: !self.is_chat_empty(),
            status: self.status(),
            autocomplete: commands.open.then(|| commands.filtered.clone()),
            highlight: commands.valid,
        }
    }

    ////////////////////////////////////////// operations //////////////////////////////////////////

    /// Records a change to the input text.
    ///
    /// The draft is saved before the debounce timer is re-armed.
    pub fn input_changed(&mut self, text: &str) -> Result<()> {
        let Some(chat_id) = self.active_chat() else {
            return Ok(());
        };
        self.stores.drafts.save_draft_message(chat_id, text)?;
        self.debouncer.schedule(chat_id, text);
        self.input.set_input(text);
        tracing::trace!(%chat_id, len = text.len(), "draft saved");
        Ok(())
    }

    /// Sends the draft of the current chat.
    ///
    /// With too many tools enabled, the agent is first restricted to the meta
    /// tools and the draft is wrapped in instructions to choose its own tools.
    /// The draft is cleared once the message is dispatched.
    pub async fn submit(&mut self) -> Result<()> {
        let Some(chat_id) = self.active_chat() else {
            return Ok(());
        };
        if self.is_submitting_disabled() {
            return Ok(());
        }
        let draft = self.current_input();
        let text = if self.agent.has_too_many_tools() {
            let meta_tools: Vec<&str> = self.config.meta_tools.iter().map(String::as_str).collect();
            self.stores.tools.set_only_tools(&meta_tools);
            PAGE_SUBMITS_RESTRICTED.click();
            tracing::info!(%chat_id, "too many tools enabled; restricting to meta tools");
            tool_restricted_message(&draft)
        } else {
            draft
        };
        self.agent.set_is_submitting(true);
        if let Err(err) = self.agent.send_message(&text).await {
            self.agent.set_is_submitting(false);
            return Err(err);
        }
        PAGE_SUBMITS.click();
        self.stores.drafts.clear_draft_message(chat_id)?;
        self.debouncer.cancel();
        self.sync_input();
        Ok(())
    }

    /// Sends a suggested prompt unchanged. Works with or without a selected chat.
    pub async fn select_prompt(&mut self, prompt: &str) -> Result<()> {
        self.agent.set_is_submitting(true);
        if let Err(err) = self.agent.send_message(prompt).await {
            self.agent.set_is_submitting(false);
            return Err(err);
        }
        PAGE_PROMPT_SELECTS.click();
        self.sync_input();
        Ok(())
    }

    /// Replays the original task of the conversation.
    ///
    /// Everything but the memories message is dropped and the first text of
    /// the first user message is sent again. Does nothing when there is no
    /// such text.
    pub async fn rerun_agent(&mut self) -> Result<()> {
        let Some(chat_id) = self.active_chat() else {
            return Ok(());
        };
        if self.is_rerun_disabled() {
            return Ok(());
        }
        let messages = self.agent.messages();
        let Some(task) = first_user_message(messages)
            .and_then(Message::first_text)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
        else {
            return Ok(());
        };
        let kept: Vec<Message> = messages
            .iter()
            .find(|m| m.id == self.config.memories_message_id)
            .cloned()
            .into_iter()
            .collect();
        tracing::info!(%chat_id, kept_memories = !kept.is_empty(), "rerunning original task");
        self.agent.set_messages(kept);
        self.agent.set_is_submitting(true);
        if let Err(err) = self.agent.send_message(&task).await {
            self.agent.set_is_submitting(false);
            return Err(err);
        }
        PAGE_RERUNS.click();
        Ok(())
    }

    /// Empties the conversation and the draft without sending anything.
    pub fn clear_chat(&mut self) -> Result<()> {
        let Some(chat_id) = self.active_chat() else {
            return Ok(());
        };
        self.agent.set_messages(Vec::new());
        self.stores.drafts.clear_draft_message(chat_id)?;
        self.debouncer.cancel();
        self.sync_input();
        PAGE_CLEARS.click();
        tracing::info!(%chat_id, "chat cleared");
        Ok(())
    }

    /// Replaces the conversation with a request to summarize it.
    ///
    /// Each message becomes a `role: text` line using its first text part.
    /// Does nothing when there are no messages.
    pub async fn compact_chat(&mut self) -> Result<()> {
        let Some(chat_id) = self.active_chat() else {
            return Ok(());
        };
        let messages = self.agent.messages();
        if messages.is_empty() {
            return Ok(());
        }
        let conversation = messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.first_text().unwrap_or_default()))
            .collect::<Vec<_>>()
            .join("\n");
        let count = messages.len();
        tracing::info!(%chat_id, messages = count, "compacting chat");
        self.agent.set_messages(Vec::new());
        self.agent.send_message(&summarization_request(&conversation)).await?;
        self.stores.drafts.clear_draft_message(chat_id)?;
        self.debouncer.cancel();
        self.sync_input();
        PAGE_COMPACTIONS.click();
        Ok(())
    }

    /// Stops the reply in progress.
    pub async fn stop(&mut self) -> Result<()> {
        self.agent.stop().await
    }

    /// Runs a slash command.
    pub async fn execute(&mut self, command: SlashCommand) -> Result<()> {
        match command {
            SlashCommand::Clear => self.clear_chat(),
            SlashCommand::Compact => self.compact_chat().await,
        }
    }

    /// Handles a key press in the input and performs the resulting action.
    ///
    /// In the empty state the action is reported but nothing is performed.
    pub async fn handle_key(&mut self, press: KeyPress) -> Result<InputAction> {
        self.sync_input();
        let action = self.input.handle_key(press, self.is_submitting_disabled());
        self.perform(action).await?;
        Ok(action)
    }

    /// Runs the command at `index` in the autocomplete panel.
    pub async fn select_command(&mut self, index: usize) -> Result<Option<InputAction>> {
        self.sync_input();
        let Some(action) = self.input.select_command(index) else {
            return Ok(None);
        };
        self.perform(action).await?;
        Ok(Some(action))
    }

    async fn perform(&mut self, action: InputAction) -> Result<()> {
        if self.surface() == ChatSurface::NoChat {
            return Ok(());
        }
        match action {
            InputAction::Execute(command) => self.execute(command).await,
            InputAction::Submit => self.submit().await,
            InputAction::Newline | InputAction::Ignored => Ok(()),
        }
    }

    //////////////////////////////////////////// editing ///////////////////////////////////////////

    /// Begins editing a message.
    pub fn start_edit(&mut self, message_id: &str) {
        self.agent.start_edit(message_id);
    }

    /// Replaces the content of the edit in progress.
    pub fn set_editing_content(&mut self, content: String) {
        self.agent.set_editing_content(content);
    }

    /// Abandons the edit in progress.
    pub fn cancel_edit(&mut self) {
        self.agent.cancel_edit();
    }

    /// Writes the edit in progress back to its message.
    pub async fn save_edit(&mut self, message_id: &str) -> Result<()> {
        self.agent.save_edit(message_id).await
    }

    /// Deletes a message.
    pub async fn delete_message(&mut self, message_id: &str) -> Result<()> {
        self.agent.delete_message(message_id).await
    }

    /// Regenerates the agent reply at `index`.
    pub async fn regenerate_message(&mut self, index: usize) -> Result<()> {
        self.agent.regenerate_message(index).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::LocalAgentSession;
    use crate::stores::{MemoryDraftStore, MemoryModelStore, MemoryToolsStore};
    use crate::types::{Chat, MessageRole};

    fn page(chat: Option<Chat>, model: Option<&str>) -> ChatPage<LocalAgentSession> {
        let mut agent = LocalAgentSession::new();
        agent.select_chat(chat);
        let mut models = MemoryModelStore::default();
        models.set_selected_model(model.map(str::to_string));
        let stores = ChatStores::new(
            MemoryDraftStore::new(),
            MemoryToolsStore::with_tools(["github__search"]),
            models,
        );
        ChatPage::new(agent, stores, ChatConfig::new())
    }

    fn active() -> ChatPage<LocalAgentSession> {
        page(Some(Chat::new(1)), Some("llama3.2"))
    }

    #[test]
    fn input_changes_save_drafts() {
        let mut page = active();
        page.input_changed("hel").unwrap();
        page.input_changed("hello").unwrap();
        assert_eq!(page.current_input(), "hello");
        assert_eq!(page.input().input(), "hello");
        assert_eq!(page.stores().drafts.get_draft_message(ChatId(1)), "hello");
    }

    #[test]
    fn submission_gating() {
        let mut page = active();
        assert!(page.is_submitting_disabled());

        page.input_changed("   \n").unwrap();
        assert!(page.is_submitting_disabled());

        page.input_changed("hello").unwrap();
        assert!(!page.is_submitting_disabled());

        page.agent_mut().set_loading(true);
        assert!(page.is_submitting_disabled());
        page.agent_mut().set_loading(false);

        page.agent_mut().set_is_submitting(true);
        assert!(page.is_submitting_disabled());
        page.agent_mut().set_is_submitting(false);

        page.stores_mut().models.set_selected_model(Some(String::new()));
        assert!(page.is_submitting_disabled());
    }

    #[test]
    fn derived_flags() {
        let mut page = active();
        assert!(!page.is_regenerating());
        assert!(!page.is_preparing());
        assert_eq!(page.status(), ChatStatus::Ready);

        page.agent_mut().set_is_submitting(true);
        assert!(page.is_preparing());
        assert!(page.is_rerun_disabled());
        assert_eq!(page.status(), ChatStatus::Submitted);

        page.agent_mut().set_loading(true);
        assert!(page.is_regenerating());
        assert!(!page.is_preparing());
        assert_eq!(page.status(), ChatStatus::Streaming);
    }

    #[tokio::test]
    async fn submit_sends_and_clears_draft() {
        let mut page = active();
        page.input_changed("What is on my calendar?").unwrap();
        page.submit().await.unwrap();

        assert_eq!(page.agent().sent(), &["What is on my calendar?".to_string()]);
        assert_eq!(page.current_input(), "");
        assert_eq!(page.input().input(), "");
        assert_eq!(
            page.stores().tools.active_tools(),
            vec!["github__search".to_string()]
        );
    }

    #[tokio::test]
    async fn disabled_submit_is_a_no_op() {
        let mut page = page(Some(Chat::new(1)), None);
        page.input_changed("hello").unwrap();
        page.submit().await.unwrap();
        assert!(page.agent().sent().is_empty());
        assert_eq!(page.current_input(), "hello");
    }

    #[tokio::test]
    async fn too_many_tools_restricts_and_rewrites() {
        let mut page = active();
        page.agent_mut().set_too_many_tools(true);
        page.input_changed("Book a flight").unwrap();
        page.submit().await.unwrap();

        let sent = &page.agent().sent()[0];
        assert!(sent.starts_with("You currently have only list_available_tools"));
        assert!(sent.ends_with("\n\nBook a flight"));
        assert_eq!(
            page.stores().tools.active_tools(),
            vec![
                "archestra__disable_tools".to_string(),
                "archestra__enable_tools".to_string(),
                "archestra__list_available_tools".to_string(),
            ]
        );
        assert_eq!(page.current_input(), "");
    }

    #[tokio::test]
    async fn rerun_replays_first_user_text() {
        let mut page = active();
        page.agent_mut().set_messages(vec![
            Message::user("1", "A"),
            Message::agent("2", "B"),
            Message::user("3", "C"),
        ]);
        page.rerun_agent().await.unwrap();

        assert_eq!(page.agent().sent(), &["A".to_string()]);
        let texts: Vec<_> = page
            .agent()
            .messages()
            .iter()
            .filter_map(Message::first_text)
            .collect();
        assert!(!texts.contains(&"B"));
        assert!(!texts.contains(&"C"));
        assert_eq!(page.agent().messages()[0].first_text(), Some("A"));
    }

    #[tokio::test]
    async fn rerun_keeps_memories() {
        let mut page = active();
        page.agent_mut().set_messages(vec![
            Message::system("system-memories", "likes tea"),
            Message::user("1", "A"),
            Message::agent("2", "B"),
        ]);
        page.rerun_agent().await.unwrap();

        let messages = page.agent().messages();
        assert_eq!(messages[0].id, "system-memories");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].first_text(), Some("A"));
        assert_eq!(messages.len(), 3);
    }

    #[tokio::test]
    async fn rerun_without_user_text_is_a_no_op() {
        let mut page = active();
        page.agent_mut().set_messages(vec![Message::agent("2", "B")]);
        page.rerun_agent().await.unwrap();
        assert!(page.agent().sent().is_empty());
        assert_eq!(page.agent().messages().len(), 1);

        page.agent_mut().set_messages(vec![Message::new("1", MessageRole::User, vec![])]);
        page.rerun_agent().await.unwrap();
        assert!(page.agent().sent().is_empty());
    }

    #[tokio::test]
    async fn clear_empties_messages_and_draft() {
        let mut page = active();
        page.agent_mut().set_messages(vec![Message::user("1", "A")]);
        page.input_changed("/clear").unwrap();

        let action = page.handle_key(KeyPress::ENTER).await.unwrap();
        assert_eq!(action, InputAction::Execute(SlashCommand::Clear));
        assert!(page.agent().messages().is_empty());
        assert_eq!(page.current_input(), "");
        assert!(page.agent().sent().is_empty());
    }

    #[tokio::test]
    async fn compact_sends_summary_request() {
        let mut page = active();
        page.agent_mut().set_messages(vec![
            Message::user("1", "hi"),
            Message::agent("2", "hello"),
        ]);
        page.input_changed("/compact").unwrap();
        page.handle_key(KeyPress::ENTER).await.unwrap();

        let sent = &page.agent().sent()[0];
        assert!(sent.starts_with("Please provide a concise summary"));
        assert!(sent.contains("user: hi\nagent: hello"));
        assert_eq!(page.current_input(), "");
        assert_eq!(page.agent().messages()[0].first_text(), Some(sent.as_str()));
    }

    #[tokio::test]
    async fn compact_without_messages_is_a_no_op() {
        let mut page = active();
        page.input_changed("keep me").unwrap();
        page.compact_chat().await.unwrap();
        assert!(page.agent().sent().is_empty());
        assert_eq!(page.current_input(), "keep me");
    }

    #[tokio::test]
    async fn no_chat_is_inert() {
        let mut page = page(None, Some("llama3.2"));
        assert_eq!(page.surface(), ChatSurface::NoChat);
        assert!(page.shows_suggestions());

        page.input_changed("typed").unwrap();
        assert_eq!(page.current_input(), "");
        page.submit().await.unwrap();
        page.clear_chat().unwrap();
        page.compact_chat().await.unwrap();
        page.rerun_agent().await.unwrap();
        assert!(page.agent().sent().is_empty());

        let view = page.input_view();
        assert!(view.disabled);
        assert!(view.rerun_disabled);
        assert_eq!(view.input, "");
        assert_eq!(view.status, ChatStatus::Ready);
    }

    #[tokio::test]
    async fn prompt_select_works_without_chat() {
        let mut page = page(None, None);
        page.select_prompt("What meetings do I have tomorrow?").await.unwrap();
        assert_eq!(
            page.agent().sent(),
            &["What meetings do I have tomorrow?".to_string()]
        );
        assert!(matches!(page.surface(), ChatSurface::Active { .. }));
    }

    #[test]
    fn input_view_reflects_autocomplete() {
        let mut page = active();
        page.input_changed("/c").unwrap();
        let view = page.input_view();
        assert_eq!(
            view.autocomplete,
            Some(vec![SlashCommand::Clear, SlashCommand::Compact])
        );
        assert!(!view.highlight);

        page.input_changed("/compact").unwrap();
        let view = page.input_view();
        assert!(view.highlight);
        assert!(!view.disabled);
    }
}
