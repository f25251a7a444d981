//! Read-only aggregates and the monthly archive.

use crate::core::clock::Clock;
use crate::core::cycle::month_key;
use crate::core::services::ServiceResult;
use crate::domain::emi::EmiKind;
use crate::domain::history::MonthlySnapshot;
use crate::domain::ledger::{Ledger, SNAPSHOT_RETENTION};

/// Derived figures computed from the current state on every access.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerTotals {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Monthly outflow across non-closed installments.
    pub total_emis: f64,
    /// Flat-structure approximation of remaining loan principal.
    pub total_emi_outstanding: f64,
    /// Minimum recurring outflow to stay current next cycle.
    pub next_month_needed: f64,
    pub total_bank_balance: f64,
    pub total_investments: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn totals(ledger: &Ledger) -> LedgerTotals {
        let total_income = ledger.income.iter().map(|entry| entry.amount).sum();
        let total_expenses = ledger.expenses.iter().map(|entry| entry.amount).sum();

        let active: Vec<_> = ledger.emis.iter().filter(|emi| emi.is_active()).collect();
        let total_emis = active.iter().map(|emi| emi.amount).sum();
        let total_emi_outstanding = active
            .iter()
            .filter(|emi| emi.kind == EmiKind::Debt)
            .map(|emi| emi.outstanding())
            .sum();
        let next_month_needed = active.iter().map(|emi| emi.amount).sum();

        LedgerTotals {
            total_income,
            total_expenses,
            total_emis,
            total_emi_outstanding,
            next_month_needed,
            total_bank_balance: ledger.banks.iter().map(|bank| bank.balance).sum(),
            total_investments: ledger.investments.total(),
        }
    }

    /// Archives the current aggregates under this month's key, retaining
    /// only the most recent twelve snapshots.
    pub fn take_monthly_snapshot(ledger: &mut Ledger, clock: &dyn Clock) -> ServiceResult<()> {
        let totals = Self::totals(ledger);
        ledger.historical_stats.push(MonthlySnapshot {
            month: month_key(clock.today()),
            income: totals.total_income,
            expenses: totals.total_expenses,
            investments: totals.total_investments,
        });
        let overflow = ledger.historical_stats.len().saturating_sub(SNAPSHOT_RETENTION);
        if overflow > 0 {
            ledger.historical_stats.drain(..overflow);
        }
        Ok(())
    }
}
