use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::EntryId;

/// Kind of financial event captured by the audit log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Income,
    Expense,
    EmiCreated,
    EmiPayment,
    EmiForceClose,
    Investment,
}

/// How an investment history record changed the balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentAction {
    /// Absolute reset of the asset-class balance; `amount` is the new
    /// balance, not a flow, so it is not comparable to flow amounts.
    Rebase,
    /// Additive contribution; `amount` is the contributed flow.
    Topup,
}

/// Immutable audit record written on every money-affecting command.
///
/// Records are append-only and most-recent-first; normal operations never
/// delete them. The optional foreign keys make cycle-scoped joins explicit
/// (notably `car_id` for fleet installment payments).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub title: String,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emi_id: Option<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<InvestmentAction>,
    /// Prior balance, recorded on investment rebases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<f64>,
}

impl HistoryEntry {
    pub fn new(
        at: DateTime<Utc>,
        kind: HistoryKind,
        title: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: at,
            kind,
            title: title.into(),
            amount,
            category: category.into(),
            bank_id: None,
            emi_id: None,
            car_id: None,
            action: None,
            previous: None,
        }
    }

    pub fn with_bank(mut self, bank_id: Option<EntryId>) -> Self {
        self.bank_id = bank_id;
        self
    }

    pub fn with_emi(mut self, emi_id: EntryId) -> Self {
        self.emi_id = Some(emi_id);
        self
    }

    pub fn with_car(mut self, car_id: EntryId) -> Self {
        self.car_id = Some(car_id);
        self
    }

    pub fn with_action(mut self, action: InvestmentAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_previous(mut self, previous: f64) -> Self {
        self.previous = Some(previous);
        self
    }
}

/// Point-in-time aggregate archived for trend graphs; the ledger keeps the
/// 12 most recent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySnapshot {
    /// `"%Y-%m"` month key.
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub investments: f64,
}
