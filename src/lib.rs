//! Cashflow Core keeps a single consistent financial snapshot (banks,
//! income, expenses, recurring installments, investments, and a taxi-fleet
//! sub-ledger) and derives summary figures from it on demand. State is
//! loaded once from a whole-document JSON store and rewritten wholesale
//! after every command.

pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow Core tracing initialized.");
    });
}
