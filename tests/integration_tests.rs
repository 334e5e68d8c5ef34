//! Integration tests driving the chat page through its public API.
//! The agent session is a scripted fake so tests control every flag.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chatpad::chat::{
        ChatConfig, ChatPage, ChatStatus, ChatStores, ChatSurface, InputAction, KeyPress,
        SlashCommand,
    };
    use chatpad::{
        AgentSession, Chat, ChatId, DraftStore, Error, JsonDraftStore, MemoryDraftStore,
        MemoryModelStore, MemoryToolsStore, Message, MessagePart, MessageRole, Result,
    };

    /// An agent session that records what it is asked to do and never replies.
    #[derive(Default)]
    struct ScriptedAgent {
        chat: Option<Chat>,
        messages: Vec<Message>,
        sent: Vec<String>,
        loading: bool,
        submitting: bool,
        editing_message_id: Option<String>,
        editing_content: String,
        regenerating_index: Option<usize>,
        backup: Vec<Message>,
        too_many_tools: bool,
        fail_sends: bool,
        stops: usize,
    }

    impl ScriptedAgent {
        fn for_chat(id: i64) -> Self {
            Self {
                chat: Some(Chat::new(id)),
                ..Self::default()
            }
        }
    }

    #[async_trait::async_trait]
    impl AgentSession for ScriptedAgent {
        fn messages(&self) -> &[Message] {
            &self.messages
        }

        fn set_messages(&mut self, messages: Vec<Message>) {
            self.messages = messages;
        }

        async fn send_message(&mut self, text: &str) -> Result<()> {
            if self.fail_sends {
                return Err(Error::agent("backend unavailable"));
            }
            self.sent.push(text.to_string());
            self.messages.push(Message::user(format!("u{}", self.sent.len()), text));
            Ok(())
        }

        async fn stop(&mut self) -> Result<()> {
            self.stops += 1;
            self.loading = false;
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
            self.editing_message_id = Some(message_id.to_string());
        }

        fn cancel_edit(&mut self) {
            self.editing_message_id = None;
        }

        async fn save_edit(&mut self, _message_id: &str) -> Result<()> {
            self.editing_message_id = None;
            Ok(())
        }

        async fn delete_message(&mut self, message_id: &str) -> Result<()> {
            self.messages.retain(|m| m.id != message_id);
            Ok(())
        }

        async fn regenerate_message(&mut self, index: usize) -> Result<()> {
            self.backup = self.messages.clone();
            self.regenerating_index = Some(index);
            self.messages.truncate(index);
            Ok(())
        }

        fn regenerating_index(&self) -> Option<usize> {
            self.regenerating_index
        }

        fn full_messages_backup(&self) -> &[Message] {
            &self.backup
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

    fn page_with(agent: ScriptedAgent) -> ChatPage<ScriptedAgent> {
        let stores = ChatStores::new(
            MemoryDraftStore::new(),
            MemoryToolsStore::with_tools(["gmail__read", "slack__read", "calendar__list"]),
            MemoryModelStore::with_model("llama3.2"),
        );
        ChatPage::new(agent, stores, ChatConfig::new())
    }

    fn conversation() -> Vec<Message> {
        vec![Message::user("1", "A"), Message::agent("2", "B"), Message::user("3", "C")]
    }

    #[tokio::test]
    async fn enter_on_partial_command_runs_first_entry() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        page.agent_mut().messages = conversation();
        page.input_changed("/c").unwrap();

        let action = page.handle_key(KeyPress::ENTER).await.unwrap();
        assert_eq!(action, InputAction::Execute(SlashCommand::Clear));
        assert!(page.agent().messages.is_empty());
        assert!(page.agent().sent.is_empty());
    }

    #[tokio::test]
    async fn clicking_an_entry_runs_that_entry() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        page.agent_mut().messages = vec![Message::user("1", "hi"), Message::agent("2", "hello")];
        page.input_changed("/c").unwrap();

        let action = page.select_command(1).await.unwrap();
        assert_eq!(action, Some(InputAction::Execute(SlashCommand::Compact)));
        assert_eq!(page.agent().sent.len(), 1);
        assert!(page.agent().sent[0].contains("user: hi\nagent: hello"));
    }

    #[tokio::test]
    async fn shift_enter_never_submits() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        page.input_changed("line one").unwrap();
        let action = page.handle_key(KeyPress::SHIFT_ENTER).await.unwrap();
        assert_eq!(action, InputAction::Newline);
        assert!(page.agent().sent.is_empty());
        assert_eq!(page.current_input(), "line one");
    }

    #[tokio::test]
    async fn enter_submits_and_marks_in_flight() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        page.input_changed("Summarize my week").unwrap();

        let action = page.handle_key(KeyPress::ENTER).await.unwrap();
        assert_eq!(action, InputAction::Submit);
        assert_eq!(page.agent().sent, vec!["Summarize my week".to_string()]);
        assert!(page.agent().is_submitting());
        assert!(page.is_preparing());
        assert_eq!(page.status(), ChatStatus::Submitted);
        assert_eq!(page.current_input(), "");

        page.input_changed("again").unwrap();
        let action = page.handle_key(KeyPress::ENTER).await.unwrap();
        assert_eq!(action, InputAction::Ignored);
        assert_eq!(page.agent().sent.len(), 1);
    }

    #[tokio::test]
    async fn failed_send_keeps_the_draft() {
        let mut agent = ScriptedAgent::for_chat(1);
        agent.fail_sends = true;
        let mut page = page_with(agent);
        page.input_changed("important").unwrap();

        let err = page.submit().await.unwrap_err();
        assert!(err.is_agent());
        assert_eq!(page.current_input(), "important");
        assert!(!page.agent().is_submitting());
    }

    #[tokio::test]
    async fn too_many_tools_rewrites_but_clears_raw_draft() {
        let mut agent = ScriptedAgent::for_chat(1);
        agent.too_many_tools = true;
        let mut page = page_with(agent);
        page.input_changed("Check slack").unwrap();
        page.submit().await.unwrap();

        let sent = &page.agent().sent[0];
        assert!(sent.contains("1. Call list_available_tools"));
        assert!(sent.contains("2. Call enable_tools"));
        assert!(sent.contains("3. After enabling the necessary tools, disable Archestra tools"));
        assert!(sent.ends_with("Check slack"));
        assert_eq!(page.stores().drafts.get_draft_message(ChatId(1)), "");
        assert_eq!(page.stores().tools.active_tools().len(), 3);
        assert!(
            page.stores()
                .tools
                .active_tools()
                .iter()
                .all(|t| t.starts_with("archestra__"))
        );
    }

    #[tokio::test]
    async fn rerun_resets_to_memories_then_replays() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        let mut messages = vec![Message::system("system-memories", "prefers short answers")];
        messages.extend(conversation());
        page.agent_mut().messages = messages;

        page.rerun_agent().await.unwrap();
        assert_eq!(page.agent().sent, vec!["A".to_string()]);
        let ids: Vec<_> = page.agent().messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["system-memories", "u1"]);
    }

    #[tokio::test]
    async fn rerun_uses_first_text_part_of_first_user_message() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        page.agent_mut().messages = vec![
            Message::agent("0", "welcome"),
            Message::new(
                "1",
                MessageRole::User,
                vec![
                    MessagePart::File {
                        media_type: "text/plain".to_string(),
                        url: "file:///tmp/notes.txt".to_string(),
                    },
                    MessagePart::text("Use the notes"),
                ],
            ),
        ];
        page.rerun_agent().await.unwrap();
        assert_eq!(page.agent().sent, vec!["Use the notes".to_string()]);
        assert_eq!(page.agent().messages.len(), 1);
    }

    #[tokio::test]
    async fn rerun_is_blocked_while_in_flight() {
        let mut agent = ScriptedAgent::for_chat(1);
        agent.messages = conversation();
        agent.loading = true;
        let mut page = page_with(agent);
        assert!(page.is_rerun_disabled());
        page.rerun_agent().await.unwrap();
        assert!(page.agent().sent.is_empty());
        assert_eq!(page.agent().messages.len(), 3);
    }

    #[tokio::test]
    async fn compact_flattens_every_role() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        page.agent_mut().messages = vec![
            Message::system("m", "remember"),
            Message::user("1", "hi"),
            Message::new("2", MessageRole::Agent, vec![]),
        ];
        page.input_changed("stale draft").unwrap();
        page.compact_chat().await.unwrap();

        let sent = &page.agent().sent[0];
        assert!(sent.ends_with("---\n\nsystem: remember\nuser: hi\nagent: "));
        assert_eq!(page.agent().messages.len(), 1);
        assert_eq!(page.current_input(), "");
    }

    #[tokio::test]
    async fn regeneration_shows_backup() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        page.agent_mut().messages = conversation();
        page.regenerate_message(1).await.unwrap();

        assert_eq!(page.agent().messages.len(), 1);
        assert_eq!(page.display_messages().len(), 3);
        assert!(page.is_regenerating());
        assert!(!page.is_preparing());

        page.agent_mut().backup.clear();
        assert_eq!(page.display_messages().len(), 1);

        page.agent_mut().regenerating_index = None;
        page.agent_mut().backup = conversation();
        assert_eq!(page.display_messages().len(), 1);
    }

    #[tokio::test]
    async fn edits_and_deletes_pass_through() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        page.agent_mut().messages = conversation();

        page.start_edit("1");
        assert_eq!(page.agent().editing_message_id(), Some("1"));
        page.set_editing_content("A'".to_string());
        assert_eq!(page.agent().editing_content(), "A'");
        page.cancel_edit();
        assert!(page.agent().editing_message_id().is_none());

        page.delete_message("2").await.unwrap();
        assert_eq!(page.agent().messages.len(), 2);

        page.agent_mut().loading = true;
        page.stop().await.unwrap();
        assert_eq!(page.agent().stops, 1);
        assert!(!page.agent().is_loading());
    }

    #[tokio::test]
    async fn empty_state_only_allows_prompts() {
        let mut page = page_with(ScriptedAgent::default());
        assert_eq!(page.surface(), ChatSurface::NoChat);

        page.input_changed("/clear").unwrap();
        let action = page.handle_key(KeyPress::ENTER).await.unwrap();
        assert_eq!(action, InputAction::Ignored);
        assert!(page.select_command(0).await.unwrap().is_none());
        assert!(page.input_view().disabled);

        page.select_prompt("What meetings do I have tomorrow?").await.unwrap();
        assert_eq!(page.agent().sent.len(), 1);
        assert!(page.agent().is_submitting());
    }

    #[tokio::test]
    async fn switching_chats_switches_drafts() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        page.input_changed("for chat one").unwrap();

        page.agent_mut().chat = Some(Chat::new(2));
        page.refresh();
        assert_eq!(page.current_input(), "");
        assert_eq!(page.input().input(), "");
        page.input_changed("for chat two").unwrap();

        page.agent_mut().chat = Some(Chat::new(1));
        page.refresh();
        assert_eq!(page.input().input(), "for chat one");
    }

    #[tokio::test(start_paused = true)]
    async fn typing_burst_debounces_once() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        for text in ["d", "dr", "dra", "draf", "draft"] {
            page.input_changed(text).unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert_eq!(page.current_input(), text);
        }
        assert_eq!(page.debouncer().fired(), 0);
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(page.debouncer().fired(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn placeholder_rotates_while_mounted() {
        let mut page = page_with(ScriptedAgent::for_chat(1));
        let first = page.input_view().placeholder;
        page.mount();

        tokio::time::sleep(Duration::from_millis(7_100)).await;
        let second = page.input_view().placeholder;
        assert_ne!(first, second);

        tokio::time::sleep(Duration::from_secs(14)).await;
        assert_eq!(page.input_view().placeholder, first);

        page.unmount();
        tokio::time::sleep(Duration::from_secs(7)).await;
        assert_eq!(page.input_view().placeholder, first);
    }

    #[tokio::test]
    async fn drafts_persist_through_json_store() {
        let dir = std::env::temp_dir().join(format!("chatpad-it-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("drafts.json").to_string_lossy().into_owned();
        let _ = std::fs::remove_file(&path);

        {
            let stores = ChatStores::new(
                JsonDraftStore::open(path.clone()).unwrap(),
                MemoryToolsStore::default(),
                MemoryModelStore::with_model("llama3.2"),
            );
            let mut page = ChatPage::new(ScriptedAgent::for_chat(9), stores, ChatConfig::new());
            page.input_changed("unfinished thought").unwrap();
        }

        let stores = ChatStores::new(
            JsonDraftStore::open(path.clone()).unwrap(),
            MemoryToolsStore::default(),
            MemoryModelStore::with_model("llama3.2"),
        );
        let mut page = ChatPage::new(ScriptedAgent::for_chat(9), stores, ChatConfig::new());
        assert_eq!(page.input().input(), "unfinished thought");

        page.submit().await.unwrap();
        let reopened = JsonDraftStore::open(path.clone()).unwrap();
        assert_eq!(reopened.get_draft_message(ChatId(9)), "");
        let _ = std::fs::remove_file(&path);
    }
}
