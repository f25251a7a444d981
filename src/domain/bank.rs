use serde::{Deserialize, Serialize};

use crate::domain::common::{EntryId, Identifiable, NamedEntity};

/// A bank account tracked by the ledger.
///
/// The balance is the running sum of the opening balance plus every signed
/// flow routed through the account; there is no independent reconciliation
/// and no floor, so balances may go negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bank {
    pub id: EntryId,
    pub name: String,
    pub balance: f64,
}

impl Bank {
    pub fn new(id: EntryId, name: impl Into<String>, balance: f64) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
        }
    }

    pub fn credit(&mut self, amount: f64) {
        self.balance += amount;
    }

    pub fn debit(&mut self, amount: f64) {
        self.balance -= amount;
    }
}

impl Identifiable for Bank {
    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl NamedEntity for Bank {
    fn name(&self) -> &str {
        &self.name
    }
}
