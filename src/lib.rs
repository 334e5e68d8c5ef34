// Public modules
pub mod agent;
pub mod chat;
pub mod error;
pub mod observability;
pub mod stores;
pub mod types;

// Re-exports
pub use agent::{AgentSession, LocalAgentSession};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use stores::{
    DraftStore, JsonDraftStore, MemoryDraftStore, MemoryModelStore, MemoryToolsStore, ModelStore,
    ToolsStore,
};
pub use types::*;
