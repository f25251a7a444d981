//! Income and expense commands.

use crate::core::clock::Clock;
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::common::EntryId;
use crate::domain::entry::{ExpenseEntry, IncomeEntry, NewExpense, NewIncome};
use crate::domain::history::{HistoryEntry, HistoryKind};
use crate::domain::ledger::Ledger;

/// Commands over the income and expense collections.
///
/// Additions prepend (most-recent-first), route the amount through the named
/// bank when it resolves, and append an audit record. Edits and deletions
/// deliberately leave bank balances and the audit log untouched; the log is
/// append-only and balances reflect flows as they happened.
pub struct CashflowService;

impl CashflowService {
    /// Records an income entry and returns its id. An unresolvable
    /// `bank_id` leaves the amount untracked rather than failing.
    pub fn add_income(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        draft: NewIncome,
    ) -> ServiceResult<EntryId> {
        let at = clock.now();
        let id = EntryId::from_timestamp(at);
        ledger.route_through_bank(draft.bank_id.as_ref(), draft.amount);
        ledger.push_history(
            HistoryEntry::new(at, HistoryKind::Income, &draft.name, draft.amount, &draft.source)
                .with_bank(draft.bank_id.clone()),
        );
        let entry = IncomeEntry::from_draft(id.clone(), draft);
        ledger.income.insert(0, entry);
        Ok(id)
    }

    /// Records an expense entry and returns its id.
    pub fn add_expense(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        draft: NewExpense,
    ) -> ServiceResult<EntryId> {
        let at = clock.now();
        let id = EntryId::from_timestamp(at);
        ledger.route_through_bank(draft.bank_id.as_ref(), -draft.amount);
        ledger.push_history(
            HistoryEntry::new(at, HistoryKind::Expense, &draft.name, draft.amount, &draft.category)
                .with_bank(draft.bank_id.clone()),
        );
        let entry = ExpenseEntry::from_draft(id.clone(), draft);
        ledger.expenses.insert(0, entry);
        Ok(id)
    }

    /// Replaces the entry's fields, preserving its id. No balance or audit
    /// reconciliation happens.
    pub fn edit_income(ledger: &mut Ledger, id: &EntryId, draft: NewIncome) -> ServiceResult<()> {
        let entry = ledger
            .income
            .iter_mut()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| ServiceError::Invalid("Income entry not found".into()))?;
        *entry = IncomeEntry::from_draft(id.clone(), draft);
        Ok(())
    }

    pub fn edit_expense(ledger: &mut Ledger, id: &EntryId, draft: NewExpense) -> ServiceResult<()> {
        let entry = ledger
            .expenses
            .iter_mut()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| ServiceError::Invalid("Expense entry not found".into()))?;
        *entry = ExpenseEntry::from_draft(id.clone(), draft);
        Ok(())
    }

    /// Removes by id. The bank credit the entry caused is not reversed.
    pub fn delete_income(ledger: &mut Ledger, id: &EntryId) -> ServiceResult<()> {
        let before = ledger.income.len();
        ledger.income.retain(|entry| &entry.id != id);
        if ledger.income.len() == before {
            return Err(ServiceError::Invalid("Income entry not found".into()));
        }
        Ok(())
    }

    pub fn delete_expense(ledger: &mut Ledger, id: &EntryId) -> ServiceResult<()> {
        let before = ledger.expenses.len();
        ledger.expenses.retain(|entry| &entry.id != id);
        if ledger.expenses.len() == before {
            return Err(ServiceError::Invalid("Expense entry not found".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::services::BankService;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2026, 4, 10, 8, 0, 0).unwrap())
    }

    fn income(name: &str, amount: f64, bank_id: Option<EntryId>) -> NewIncome {
        NewIncome {
            name: name.into(),
            amount,
            source: "Salary".into(),
            date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
            bank_id,
        }
    }

    #[test]
    fn add_income_prepends_and_logs() {
        let mut ledger = Ledger::new();
        let clock = clock();
        CashflowService::add_income(&mut ledger, &clock, income("April pay", 1000.0, None)).unwrap();
        CashflowService::add_income(&mut ledger, &clock, income("Side gig", 250.0, None)).unwrap();

        assert_eq!(ledger.income[0].name, "Side gig");
        assert_eq!(ledger.history.len(), 2);
        assert_eq!(ledger.history[0].kind, HistoryKind::Income);
    }

    #[test]
    fn expense_routed_to_missing_bank_stays_untracked() {
        let mut ledger = Ledger::new();
        let clock = clock();
        let bank_id = BankService::add(&mut ledger, &clock, "HDFC", 500.0).unwrap();

        let draft = NewExpense {
            name: "Groceries".into(),
            amount: 120.0,
            category: "Food".into(),
            date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
            bank_id: Some(EntryId::new("gone")),
        };
        CashflowService::add_expense(&mut ledger, &clock, draft).unwrap();
        assert_eq!(ledger.bank(&bank_id).unwrap().balance, 500.0);
    }

    #[test]
    fn delete_does_not_reverse_bank_credit() {
        let mut ledger = Ledger::new();
        let clock = clock();
        let bank_id = BankService::add(&mut ledger, &clock, "HDFC", 0.0).unwrap();
        let entry_id = CashflowService::add_income(
            &mut ledger,
            &clock,
            income("Bonus", 300.0, Some(bank_id.clone())),
        )
        .unwrap();

        CashflowService::delete_income(&mut ledger, &entry_id).unwrap();
        assert!(ledger.income.is_empty());
        assert_eq!(ledger.bank(&bank_id).unwrap().balance, 300.0);
        assert_eq!(ledger.history.len(), 1, "audit log keeps the income record");
    }

    #[test]
    fn edit_preserves_id() {
        let mut ledger = Ledger::new();
        let clock = clock();
        let id = CashflowService::add_income(&mut ledger, &clock, income("Pay", 1000.0, None)).unwrap();
        CashflowService::edit_income(&mut ledger, &id, income("Pay (corrected)", 1100.0, None))
            .unwrap();
        let entry = ledger.income_entry(&id).unwrap();
        assert_eq!(entry.name, "Pay (corrected)");
        assert_eq!(entry.amount, 1100.0);
    }
}
