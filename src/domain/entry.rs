use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{EntryId, Identifiable, NamedEntity};

/// A recorded income event, optionally routed through a bank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEntry {
    pub id: EntryId,
    pub name: String,
    pub amount: f64,
    /// Income source label (salary, freelance, ...). Wire name kept as `type`.
    #[serde(rename = "type", default)]
    pub source: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<EntryId>,
}

/// A recorded expense event, optionally routed through a bank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    pub id: EntryId,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<EntryId>,
}

/// Caller-supplied fields for a new or replacement income entry.
#[derive(Debug, Clone)]
pub struct NewIncome {
    pub name: String,
    pub amount: f64,
    pub source: String,
    pub date: NaiveDate,
    pub bank_id: Option<EntryId>,
}

/// Caller-supplied fields for a new or replacement expense entry.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub bank_id: Option<EntryId>,
}

impl IncomeEntry {
    pub fn from_draft(id: EntryId, draft: NewIncome) -> Self {
        Self {
            id,
            name: draft.name,
            amount: draft.amount,
            source: draft.source,
            date: draft.date,
            bank_id: draft.bank_id,
        }
    }
}

impl ExpenseEntry {
    pub fn from_draft(id: EntryId, draft: NewExpense) -> Self {
        Self {
            id,
            name: draft.name,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            bank_id: draft.bank_id,
        }
    }
}

impl Identifiable for IncomeEntry {
    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl Identifiable for ExpenseEntry {
    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl NamedEntity for IncomeEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedEntity for ExpenseEntry {
    fn name(&self) -> &str {
        &self.name
    }
}
