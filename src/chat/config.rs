//! Configuration types for the chat page.
//!
//! This module provides CLI argument parsing via `arrrg`, YAML configuration
//! files via `serde_yaml`, and the resolved [`ChatConfig`].

use std::path::Path;
use std::time::Duration;

use arrrg_derive::CommandLine;
use serde::{Deserialize, Deserializer, Serialize};

use crate::chat::prompts::{META_TOOLS, PLACEHOLDER_EXAMPLES, SUGGESTED_PROMPTS};
use crate::error::{Error, Result};

/// Default time between placeholder rotations.
const DEFAULT_PLACEHOLDER_INTERVAL_MS: u64 = 7_000;

/// Default quiet period before a draft burst is reported.
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Default id of the message holding stored memories.
const DEFAULT_MEMORIES_MESSAGE_ID: &str = "system-memories";

/// Command-line arguments for the chatpad-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Path of a YAML configuration file.
    #[arrrg(optional, "YAML configuration file", "FILE")]
    pub config: Option<String>,

    /// Model to select at startup.
    #[arrrg(optional, "Model to select (default: none)", "MODEL")]
    pub model: Option<String>,

    /// Chat to open at startup.
    #[arrrg(optional, "Chat id to open (default: 1)", "ID")]
    pub chat: Option<i64>,

    /// Start without a chat selected.
    #[arrrg(flag, "Start with no chat selected; only suggested prompts can be sent")]
    pub no_chat: bool,

    /// File where drafts are kept between runs.
    #[arrrg(optional, "Draft file (default: in memory only)", "FILE")]
    pub drafts: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Model selected when the page starts; `None` leaves submission disabled.
    pub model: Option<String>,

    /// Chat opened at startup; `None` starts in the empty state.
    pub chat_id: Option<i64>,

    /// Id of the message holding stored memories, kept across reruns.
    pub memories_message_id: String,

    /// Placeholder examples rotated through the input.
    pub placeholder_examples: Vec<String>,

    /// Time between placeholder rotations.
    pub placeholder_interval: Duration,

    /// Quiet period after the last keystroke before a draft burst is reported.
    pub debounce_delay: Duration,

    /// Tools left enabled when a message is sent with too many tools active.
    pub meta_tools: Vec<String>,

    /// Prompts offered while a chat has no messages.
    pub suggested_prompts: Vec<String>,

    /// Path of the draft file, if drafts persist across runs.
    pub drafts_path: Option<String>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: none
    /// - Chat: 1
    /// - Placeholder interval: 7 seconds
    /// - Debounce delay: 500 milliseconds
    /// - Drafts: in memory
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: None,
            chat_id: Some(1),
            memories_message_id: DEFAULT_MEMORIES_MESSAGE_ID.to_string(),
            placeholder_examples: PLACEHOLDER_EXAMPLES.iter().map(|s| s.to_string()).collect(),
            placeholder_interval: Duration::from_millis(DEFAULT_PLACEHOLDER_INTERVAL_MS),
            debounce_delay: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            meta_tools: META_TOOLS.iter().map(|s| s.to_string()).collect(),
            suggested_prompts: SUGGESTED_PROMPTS.iter().map(|s| s.to_string()).collect(),
            drafts_path: None,
            use_color: true,
        }
    }

    /// Loads a configuration file, filling unspecified fields with defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;
        Self::from_yaml(&content)
    }

    /// Parses a YAML configuration, filling unspecified fields with defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: ChatConfigFile = serde_yaml::from_str(content)?;
        file.resolve()
    }

    /// Sets the selected model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the chat opened at startup.
    pub fn with_chat_id(mut self, chat_id: Option<i64>) -> Self {
        self.chat_id = chat_id;
        self
    }

    /// Sets the memories message id.
    pub fn with_memories_message_id(mut self, id: impl Into<String>) -> Self {
        self.memories_message_id = id.into();
        self
    }

    /// Sets the placeholder examples.
    pub fn with_placeholder_examples(mut self, examples: Vec<String>) -> Self {
        self.placeholder_examples = examples;
        self
    }

    /// Sets the placeholder rotation interval.
    pub fn with_placeholder_interval(mut self, interval: Duration) -> Self {
        self.placeholder_interval = interval;
        self
    }

    /// Sets the draft debounce delay.
    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    /// Sets the draft file path.
    pub fn with_drafts_path(mut self, path: Option<String>) -> Self {
        self.drafts_path = path;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Applies command-line overrides on top of this configuration.
    pub fn apply_args(mut self, args: &ChatArgs) -> Self {
        if let Some(model) = &args.model {
            self.model = Some(model.clone());
        }
        if let Some(chat) = args.chat {
            self.chat_id = Some(chat);
        }
        if args.no_chat {
            self.chat_id = None;
        }
        if let Some(drafts) = &args.drafts {
            self.drafts_path = Some(drafts.clone());
        }
        if args.no_color {
            self.use_color = false;
        }
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig::new().apply_args(&args)
    }
}

/// On-disk form of [`ChatConfig`]. Every field is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChatConfigFile {
    model: Option<String>,
    /// `None` when absent; `Some(None)` for an explicit `chat_id: ~`.
    #[serde(default, deserialize_with = "present")]
    chat_id: Option<Option<i64>>,
    memories_message_id: Option<String>,
    placeholder_examples: Option<Vec<String>>,
    placeholder_interval_ms: Option<u64>,
    debounce_ms: Option<u64>,
    meta_tools: Option<Vec<String>>,
    suggested_prompts: Option<Vec<String>>,
    drafts_path: Option<String>,
    use_color: Option<bool>,
}

fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ChatConfigFile {
    fn resolve(self) -> Result<ChatConfig> {
        let defaults = ChatConfig::new();
        if let Some(meta_tools) = &self.meta_tools
            && meta_tools.is_empty()
        {
            return Err(Error::config(
                "at least one meta tool is required",
                Some("meta_tools".to_string()),
            ));
        }
        if self.memories_message_id.as_deref() == Some("") {
            return Err(Error::config(
                "memories message id cannot be empty",
                Some("memories_message_id".to_string()),
            ));
        }
        Ok(ChatConfig {
            model: self.model.or(defaults.model),
            chat_id: self.chat_id.unwrap_or(defaults.chat_id),
            memories_message_id: self
                .memories_message_id
                .unwrap_or(defaults.memories_message_id),
            placeholder_examples: self
                .placeholder_examples
                .unwrap_or(defaults.placeholder_examples),
            placeholder_interval: self
                .placeholder_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.placeholder_interval),
            debounce_delay: self
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce_delay),
            meta_tools: self.meta_tools.unwrap_or(defaults.meta_tools),
            suggested_prompts: self
                .suggested_prompts
                .unwrap_or(defaults.suggested_prompts),
            drafts_path: self.drafts_path.or(defaults.drafts_path),
            use_color: self.use_color.unwrap_or(defaults.use_color),
        })
    }
}
