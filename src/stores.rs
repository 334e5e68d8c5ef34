//! Stores the chat page reads and writes besides the agent session.
//!
//! Each store is a trait so that the page can be driven by in-memory fakes in
//! tests and by persistent implementations in an application. The draft store
//! is the only writer of drafts; the tools store is the only writer of the
//! active tool set.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};
use utf8path::Path;

use crate::error::{Error, Result};
use crate::observability::{DRAFTS_CLEARED, DRAFTS_SAVED};
use crate::types::ChatId;

///////////////////////////////////////////// DraftStore /////////////////////////////////////////////

/// Keyed persistence of in-progress message text, one entry per chat.
pub trait DraftStore: Send {
    /// Stores `text` as the draft for `chat_id`, replacing any previous draft.
    fn save_draft_message(&mut self, chat_id: ChatId, text: &str) -> Result<()>;

    /// Returns the draft for `chat_id`, or the empty string when there is none.
    fn get_draft_message(&self, chat_id: ChatId) -> String;

    /// Removes the draft for `chat_id`.
    fn clear_draft_message(&mut self, chat_id: ChatId) -> Result<()>;
}

/// Draft store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryDraftStore {
    drafts: BTreeMap<ChatId, String>,
}

impl MemoryDraftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of chats with a stored draft.
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Returns true when no chat has a stored draft.
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

impl DraftStore for MemoryDraftStore {
    fn save_draft_message(&mut self, chat_id: ChatId, text: &str) -> Result<()> {
        self.drafts.insert(chat_id, text.to_string());
        DRAFTS_SAVED.click();
        Ok(())
    }

    fn get_draft_message(&self, chat_id: ChatId) -> String {
        self.drafts.get(&chat_id).cloned().unwrap_or_default()
    }

    fn clear_draft_message(&mut self, chat_id: ChatId) -> Result<()> {
        self.drafts.remove(&chat_id);
        DRAFTS_CLEARED.click();
        Ok(())
    }
}

/// Draft store that writes every change through to a JSON file.
///
/// The file is read once on open; afterwards the in-memory copy is
/// authoritative and the file is rewritten after each mutation.
pub struct JsonDraftStore {
    path: Path<'static>,
    drafts: MemoryDraftStore,
}

impl JsonDraftStore {
    /// Opens the store at `path`, loading existing drafts if the file exists.
    pub fn open(path: impl Into<Path<'static>>) -> Result<Self> {
        let path = path.into();
        let drafts = match File::open(path.as_str()) {
            Ok(file) => {
                let reader = BufReader::new(file);
                let file: DraftFile = from_reader(reader).map_err(|err| {
                    Error::serialization("failed to parse draft file", Some(Box::new(err)))
                })?;
                file.into_drafts()
            }
            Err(err) if err.kind() == ErrorKind::NotFound => MemoryDraftStore::new(),
            Err(err) => return Err(Error::io("failed to open draft file", err)),
        };
        tracing::debug!(path = path.as_str(), drafts = drafts.len(), "opened draft store");
        Ok(Self { path, drafts })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path<'static> {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let file = File::create(self.path.as_str())
            .map_err(|err| Error::io("failed to create draft file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, &DraftFile::new(&self.drafts)).map_err(|err| {
            Error::serialization("failed to serialize drafts", Some(Box::new(err)))
        })
    }
}

impl DraftStore for JsonDraftStore {
    fn save_draft_message(&mut self, chat_id: ChatId, text: &str) -> Result<()> {
        self.drafts.save_draft_message(chat_id, text)?;
        self.flush()
    }

    fn get_draft_message(&self, chat_id: ChatId) -> String {
        self.drafts.get_draft_message(chat_id)
    }

    fn clear_draft_message(&mut self, chat_id: ChatId) -> Result<()> {
        self.drafts.clear_draft_message(chat_id)?;
        self.flush()
    }
}

#[derive(Serialize, Deserialize)]
struct DraftFile {
    version: u8,
    drafts: Vec<DraftEntry>,
}

#[derive(Serialize, Deserialize)]
struct DraftEntry {
    chat_id: ChatId,
    text: String,
}

impl DraftFile {
    fn new(store: &MemoryDraftStore) -> Self {
        Self {
            version: 1,
            drafts: store
                .drafts
                .iter()
                .map(|(chat_id, text)| DraftEntry {
                    chat_id: *chat_id,
                    text: text.clone(),
                })
                .collect(),
        }
    }

    fn into_drafts(self) -> MemoryDraftStore {
        MemoryDraftStore {
            drafts: self
                .drafts
                .into_iter()
                .map(|entry| (entry.chat_id, entry.text))
                .collect(),
        }
    }
}

///////////////////////////////////////////// ToolsStore /////////////////////////////////////////////

/// The set of tools the agent may call.
pub trait ToolsStore: Send {
    /// Restricts the active tool set to exactly `tool_ids`.
    fn set_only_tools(&mut self, tool_ids: &[&str]);

    /// Returns the active tool ids in sorted order.
    fn active_tools(&self) -> Vec<String>;
}

/// Tools store kept in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryToolsStore {
    active: BTreeSet<String>,
}

impl MemoryToolsStore {
    /// Creates a store with the given tools active.
    pub fn with_tools<I, S>(tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active: tools.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToolsStore for MemoryToolsStore {
    fn set_only_tools(&mut self, tool_ids: &[&str]) {
        self.active = tool_ids.iter().map(|id| id.to_string()).collect();
    }

    fn active_tools(&self) -> Vec<String> {
        self.active.iter().cloned().collect()
    }
}

///////////////////////////////////////////// ModelStore /////////////////////////////////////////////

/// The model selection shared by every chat.
pub trait ModelStore: Send {
    /// Returns the selected model. `None` and the empty string both mean no model is chosen.
    fn selected_model(&self) -> Option<&str>;

    /// Selects a model, or clears the selection with `None`.
    fn set_selected_model(&mut self, model: Option<String>);

    /// Returns true when a non-empty model name is selected.
    fn has_selected_model(&self) -> bool {
        self.selected_model().is_some_and(|m| !m.is_empty())
    }
}

/// Model store kept in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryModelStore {
    selected: Option<String>,
}

impl MemoryModelStore {
    /// Creates a store with `model` selected.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            selected: Some(model.into()),
        }
    }
}

impl ModelStore for MemoryModelStore {
    fn selected_model(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn set_selected_model(&mut self, model: Option<String>) {
        self.selected = model;
    }
}
