//! Persistence: the JSON backend plus the background autosave worker.

pub mod autosave;
pub mod json_backend;

use crate::errors::Result;
use crate::ledger::Ledger;

/// Abstraction over persistence backends capable of storing tracker state.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger) -> Result<()>;
    fn load(&self) -> Result<Ledger>;
}

pub use autosave::AutosaveWorker;
pub use json_backend::JsonStorage;
