//! The chat page and its input.
//!
//! This module turns keystrokes and clicks into operations on a chat. It
//! supports:
//!
//! - Per-chat drafts saved on every keystroke
//! - Slash commands with autocompletion
//! - Submission gated on input, progress and model selection
//! - Rerun, clear and compact flows over the conversation
//! - A rotating placeholder hint
//!
//! # Architecture
//!
//! - [`commands`]: Slash command table and interpretation
//! - [`input`]: Key handling for the chat input
//! - [`page`]: The orchestrator composing agent session, stores and input
//! - [`config`]: CLI argument parsing and configuration
//! - [`render`]: Terminal rendering

mod commands;
mod config;
mod debounce;
mod input;
mod page;
mod placeholder;
pub mod prompts;
mod render;

pub use commands::{CommandMatch, SLASH_COMMANDS, SlashCommand, evaluate, help_text};
pub use config::{ChatArgs, ChatConfig};
pub use debounce::DraftDebouncer;
pub use input::{ChatInputController, InputAction, Key, KeyPress};
pub use page::{ChatPage, ChatStatus, ChatStores, ChatSurface, InputView};
pub use placeholder::PlaceholderRotation;
pub use render::{PlainTextRenderer, Renderer};
