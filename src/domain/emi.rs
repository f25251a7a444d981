use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{EntryId, Identifiable, NamedEntity};

/// Classifies a recurring installment obligation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmiKind {
    /// A loan with a finite tenure that counts down to closure.
    Debt,
    /// Evergreen family support; never exhausts.
    Family,
    /// Evergreen scheduled saving transfer; never exhausts.
    Saving,
    /// A fleet-linked loan, tracked in the generic list but paid from the
    /// business screen flows.
    Business,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmiStatus {
    Active,
    Closed,
}

/// A recurring monthly installment (EMI).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Emi {
    pub id: EntryId,
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: EmiKind,
    /// Total number of scheduled payments.
    pub tenure: u32,
    pub remaining_tenure: u32,
    /// Day of month the installment falls due.
    pub due_day: u32,
    pub start_date: NaiveDate,
    pub status: EmiStatus,
    #[serde(default)]
    pub start_next_month: bool,
    /// `"%Y-%m"` key of the month the installment was last confirmed paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_paid_month: Option<String>,
    /// Preferred bank to debit on payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<EntryId>,
}

/// Caller-supplied fields for a new or replacement EMI.
#[derive(Debug, Clone)]
pub struct NewEmi {
    pub name: String,
    pub amount: f64,
    pub kind: EmiKind,
    /// Required for `Debt`/`Business`; ignored for evergreen kinds.
    pub tenure: Option<u32>,
    /// Manual override of the countdown; defaults to the full tenure.
    pub remaining_tenure: Option<u32>,
    pub start_date: NaiveDate,
    pub start_next_month: bool,
    pub bank_id: Option<EntryId>,
}

impl Emi {
    /// Evergreen kinds never exhaust their tenure.
    pub fn is_evergreen(&self) -> bool {
        matches!(self.kind, EmiKind::Family | EmiKind::Saving)
    }

    pub fn is_active(&self) -> bool {
        self.status == EmiStatus::Active
    }

    /// Flat approximation of the principal still owed on a debt.
    pub fn outstanding(&self) -> f64 {
        self.amount * f64::from(self.remaining_tenure)
    }
}

impl Identifiable for Emi {
    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl NamedEntity for Emi {
    fn name(&self) -> &str {
        &self.name
    }
}
