//! Portfolio balance commands.

use crate::core::clock::Clock;
use crate::core::services::ServiceResult;
use crate::domain::history::{HistoryEntry, HistoryKind, InvestmentAction};
use crate::domain::investment::AssetClass;
use crate::domain::ledger::Ledger;

pub struct InvestmentService;

impl InvestmentService {
    /// Absolute reset of an asset-class balance. The audit record keeps the
    /// input value as `amount` and the prior balance as `previous`; a rebase
    /// is not a flow and its magnitude is not comparable to flow amounts.
    pub fn rebase(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        class: AssetClass,
        amount: f64,
    ) -> ServiceResult<()> {
        let previous = ledger.investments.balance(class);
        *ledger.investments.balance_mut(class) = amount;
        ledger.push_history(
            HistoryEntry::new(
                clock.now(),
                HistoryKind::Investment,
                format!("Adjusted {class}"),
                amount,
                "Portfolio",
            )
            .with_action(InvestmentAction::Rebase)
            .with_previous(previous),
        );
        Ok(())
    }

    /// Additive contribution to an asset-class balance.
    pub fn top_up(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        class: AssetClass,
        amount: f64,
    ) -> ServiceResult<()> {
        *ledger.investments.balance_mut(class) += amount;
        ledger.push_history(
            HistoryEntry::new(
                clock.now(),
                HistoryKind::Investment,
                format!("Topped up {class}"),
                amount,
                "Portfolio",
            )
            .with_action(InvestmentAction::Topup),
        );
        Ok(())
    }

    /// Sets the seed amount shown alongside bank balances.
    pub fn set_initial_amount(ledger: &mut Ledger, amount: f64) -> ServiceResult<()> {
        ledger.initial_amount = amount;
        Ok(())
    }
}
