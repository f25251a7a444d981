use serde::{Deserialize, Serialize};

use crate::domain::bank::Bank;
use crate::domain::business::{Business, BusinessEntry, Car, Driver};
use crate::domain::common::EntryId;
use crate::domain::emi::Emi;
use crate::domain::entry::{ExpenseEntry, IncomeEntry};
use crate::domain::history::{HistoryEntry, MonthlySnapshot};
use crate::domain::investment::Investments;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// How many monthly snapshots the ledger retains.
pub const SNAPSHOT_RETENTION: usize = 12;

/// The root financial snapshot, persisted as one JSON document.
///
/// Income, expense, EMI, and history collections are most-recent-first;
/// list consumers depend on that ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default)]
    pub income: Vec<IncomeEntry>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    #[serde(default)]
    pub emis: Vec<Emi>,
    #[serde(default)]
    pub banks: Vec<Bank>,
    #[serde(default)]
    pub investments: Investments,
    #[serde(default)]
    pub initial_amount: f64,
    #[serde(default)]
    pub historical_stats: Vec<MonthlySnapshot>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub business: Business,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            income: Vec::new(),
            expenses: Vec::new(),
            emis: Vec::new(),
            banks: Vec::new(),
            investments: Investments::default(),
            initial_amount: 0.0,
            historical_stats: Vec::new(),
            history: Vec::new(),
            business: Business::default(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn bank(&self, id: &EntryId) -> Option<&Bank> {
        self.banks.iter().find(|bank| &bank.id == id)
    }

    pub fn bank_mut(&mut self, id: &EntryId) -> Option<&mut Bank> {
        self.banks.iter_mut().find(|bank| &bank.id == id)
    }

    pub fn emi(&self, id: &EntryId) -> Option<&Emi> {
        self.emis.iter().find(|emi| &emi.id == id)
    }

    pub fn emi_mut(&mut self, id: &EntryId) -> Option<&mut Emi> {
        self.emis.iter_mut().find(|emi| &emi.id == id)
    }

    pub fn income_entry(&self, id: &EntryId) -> Option<&IncomeEntry> {
        self.income.iter().find(|entry| &entry.id == id)
    }

    pub fn expense_entry(&self, id: &EntryId) -> Option<&ExpenseEntry> {
        self.expenses.iter().find(|entry| &entry.id == id)
    }

    pub fn car(&self, id: &EntryId) -> Option<&Car> {
        self.business.cars.iter().find(|car| &car.id == id)
    }

    pub fn car_mut(&mut self, id: &EntryId) -> Option<&mut Car> {
        self.business.cars.iter_mut().find(|car| &car.id == id)
    }

    pub fn driver(&self, id: &EntryId) -> Option<&Driver> {
        self.business.drivers.iter().find(|driver| &driver.id == id)
    }

    pub fn business_entry(&self, id: &EntryId) -> Option<&BusinessEntry> {
        self.business.entries.iter().find(|entry| &entry.id == id)
    }

    /// Credits or debits the named bank. An unresolvable id is a silent
    /// no-op: the amount stays untracked cash rather than failing the
    /// surrounding command.
    pub fn route_through_bank(&mut self, bank_id: Option<&EntryId>, signed_amount: f64) {
        if let Some(id) = bank_id {
            match self.bank_mut(id) {
                Some(bank) => bank.credit(signed_amount),
                None => tracing::debug!(bank_id = %id, "flow left untracked: unknown bank"),
            }
        }
    }

    /// Prepends an audit record (most-recent-first).
    pub fn push_history(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
    }
}
