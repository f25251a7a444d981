pub mod backup;
pub mod json_store;

use crate::domain::ledger::Ledger;
use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over the whole-document persistence medium.
///
/// The ledger is one document under one fixed key: `load` reads it in full
/// (or reports that none exists yet) and `save` replaces it in full. No
/// partial updates, no diffing.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Option<Ledger>>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
}

pub use backup::{export_backup, export_history_csv, parse_backup, write_cycle_report};
pub use json_store::JsonStorage;
