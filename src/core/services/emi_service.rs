//! Recurring-installment (EMI) lifecycle commands.

use chrono::{Datelike, NaiveDate};

use crate::core::clock::Clock;
use crate::core::cycle::month_key;
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::common::EntryId;
use crate::domain::emi::{Emi, EmiKind, EmiStatus, NewEmi};
use crate::domain::history::{HistoryEntry, HistoryKind};
use crate::domain::ledger::Ledger;

/// How many days ahead of the due day an installment shows up as pending.
const DUE_WINDOW_DAYS: i64 = 15;

pub struct EmiService;

impl EmiService {
    /// Registers a new installment and returns its id.
    ///
    /// Debt and business loans require a tenure; family and saving
    /// installments are evergreen and carry a pinned single-step tenure.
    pub fn add(ledger: &mut Ledger, clock: &dyn Clock, draft: NewEmi) -> ServiceResult<EntryId> {
        let tenure = match draft.kind {
            EmiKind::Family | EmiKind::Saving => 1,
            EmiKind::Debt | EmiKind::Business => draft
                .tenure
                .filter(|tenure| *tenure > 0)
                .ok_or_else(|| ServiceError::Invalid("Loan EMIs need a tenure".into()))?,
        };
        let remaining = match draft.kind {
            EmiKind::Family | EmiKind::Saving => 1,
            EmiKind::Debt | EmiKind::Business => draft.remaining_tenure.unwrap_or(tenure),
        };
        let at = clock.now();
        let id = EntryId::from_timestamp(at);
        let category = kind_label(draft.kind);
        let emi = Emi {
            id: id.clone(),
            name: draft.name,
            amount: draft.amount,
            kind: draft.kind,
            tenure,
            remaining_tenure: remaining,
            due_day: draft.start_date.day(),
            start_date: draft.start_date,
            status: EmiStatus::Active,
            start_next_month: draft.start_next_month,
            last_paid_month: None,
            bank_id: draft.bank_id,
        };
        ledger.push_history(HistoryEntry::new(
            at,
            HistoryKind::EmiCreated,
            &emi.name,
            emi.amount,
            category,
        ));
        ledger.emis.insert(0, emi);
        Ok(id)
    }

    /// Replaces the installment's fields, preserving id and payment state.
    pub fn edit(ledger: &mut Ledger, id: &EntryId, draft: NewEmi) -> ServiceResult<()> {
        let emi = ledger
            .emi_mut(id)
            .ok_or_else(|| ServiceError::Invalid("EMI not found".into()))?;
        emi.name = draft.name;
        emi.amount = draft.amount;
        emi.kind = draft.kind;
        if let Some(tenure) = draft.tenure {
            emi.tenure = tenure;
            emi.remaining_tenure = emi.remaining_tenure.min(tenure);
        }
        if let Some(remaining) = draft.remaining_tenure {
            emi.remaining_tenure = remaining;
        }
        emi.due_day = draft.start_date.day();
        emi.start_date = draft.start_date;
        emi.start_next_month = draft.start_next_month;
        emi.bank_id = draft.bank_id;
        Ok(())
    }

    /// Removes by id without reversing past payments.
    pub fn remove(ledger: &mut Ledger, id: &EntryId) -> ServiceResult<()> {
        let before = ledger.emis.len();
        ledger.emis.retain(|emi| &emi.id != id);
        if ledger.emis.len() == before {
            return Err(ServiceError::Invalid("EMI not found".into()));
        }
        Ok(())
    }

    /// Confirms this month's payment on an installment.
    ///
    /// Debits the named bank when it resolves; evergreen kinds keep a
    /// pinned tenure of one and never close; the rest count down and close
    /// exactly when the tenure is exhausted. The payment month is stamped so
    /// duplicate prompts stay suppressed until the next calendar month.
    pub fn confirm_payment(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        id: &EntryId,
        bank_id: Option<&EntryId>,
    ) -> ServiceResult<()> {
        let at = clock.now();
        let paid_month = month_key(at.date_naive());
        let (name, amount, kind) = {
            let emi = ledger
                .emi_mut(id)
                .ok_or_else(|| ServiceError::Invalid("EMI not found".into()))?;
            if emi.is_evergreen() {
                emi.remaining_tenure = 1;
            } else {
                emi.remaining_tenure = emi.remaining_tenure.saturating_sub(1);
                if emi.remaining_tenure == 0 {
                    emi.status = EmiStatus::Closed;
                }
            }
            emi.last_paid_month = Some(paid_month);
            (emi.name.clone(), emi.amount, emi.kind)
        };

        ledger.route_through_bank(bank_id, -amount);

        tracing::debug!(emi = %id, %name, "installment payment confirmed");
        ledger.push_history(
            HistoryEntry::new(at, HistoryKind::EmiPayment, name, amount, kind_label(kind))
                .with_emi(id.clone())
                .with_bank(bank_id.cloned()),
        );
        Ok(())
    }

    /// Terminal settlement bypassing the countdown: debits the closure
    /// amount when positive, closes the installment, zeroes the tenure.
    pub fn force_close(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        id: &EntryId,
        closure_amount: f64,
        bank_id: Option<&EntryId>,
    ) -> ServiceResult<()> {
        let at = clock.now();
        let name = {
            let emi = ledger
                .emi_mut(id)
                .ok_or_else(|| ServiceError::Invalid("EMI not found".into()))?;
            emi.status = EmiStatus::Closed;
            emi.remaining_tenure = 0;
            emi.name.clone()
        };

        if closure_amount > 0.0 {
            ledger.route_through_bank(bank_id, -closure_amount);
        }

        tracing::debug!(emi = %id, %name, closure_amount, "installment force closed");
        ledger.push_history(
            HistoryEntry::new(at, HistoryKind::EmiForceClose, name, closure_amount, "debt")
                .with_emi(id.clone()),
        );
        Ok(())
    }

    /// Installments awaiting payment around `today`: active, not fleet
    /// loans, already past any start-next-month deferral, unpaid this
    /// month, and due within the prompt window (overdue included).
    pub fn pending<'a>(ledger: &'a Ledger, today: NaiveDate) -> Vec<&'a Emi> {
        let current_month = month_key(today);
        ledger
            .emis
            .iter()
            .filter(|emi| {
                if !emi.is_active() || emi.kind == EmiKind::Business {
                    return false;
                }
                if emi.start_next_month && emi.last_paid_month.is_none() {
                    return false;
                }
                if emi.last_paid_month.as_deref() == Some(current_month.as_str()) {
                    return false;
                }
                i64::from(emi.due_day) - i64::from(today.day()) <= DUE_WINDOW_DAYS
            })
            .collect()
    }
}

fn kind_label(kind: EmiKind) -> &'static str {
    match kind {
        EmiKind::Debt => "debt",
        EmiKind::Family => "family",
        EmiKind::Saving => "saving",
        EmiKind::Business => "business",
    }
}
