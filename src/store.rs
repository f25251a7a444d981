//! The ledger store: one live state object owned by the composition root,
//! with commands that persist the whole document before the new state
//! becomes authoritative.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::clock::Clock;
use crate::core::cycle::EntryWindow;
use crate::core::services::{
    BankService, CashflowService, EmiService, FleetEmiStatus, FleetProfit, FleetService,
    InvestmentService, LedgerTotals, ServiceResult, SummaryService,
};
use crate::domain::business::{BusinessEntry, NewBusinessEntry, NewCar};
use crate::domain::common::EntryId;
use crate::domain::emi::{Emi, NewEmi};
use crate::domain::entry::{NewExpense, NewIncome};
use crate::domain::investment::AssetClass;
use crate::domain::ledger::Ledger;
use crate::storage::{backup, StorageBackend};

/// Facade coordinating ledger state, commands, and persistence.
///
/// Every command follows the same pattern: clone the state, apply the
/// service, persist the clone, and only then swap it in. A failed save
/// leaves the prior in-memory state authoritative; a failed service call
/// never reaches the disk.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
}

impl LedgerStore {
    /// Loads the persisted document, falling back to an empty ledger when
    /// none exists or the load fails (failure is logged, not propagated).
    pub fn open(storage: Box<dyn StorageBackend>, clock: Arc<dyn Clock>) -> Self {
        let ledger = match storage.load() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => Ledger::new(),
            Err(err) => {
                tracing::warn!(%err, "failed to load ledger; starting from defaults");
                Ledger::new()
            }
        };
        Self {
            ledger,
            storage,
            clock,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn commit(&mut self, next: Ledger) -> ServiceResult<()> {
        self.storage.save(&next).map_err(|err| {
            tracing::warn!(%err, "save failed; keeping prior state");
            err
        })?;
        self.ledger = next;
        Ok(())
    }

    fn apply<T>(
        &mut self,
        command: impl FnOnce(&mut Ledger, &dyn Clock) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let mut next = self.ledger.clone();
        let outcome = command(&mut next, self.clock.as_ref())?;
        self.commit(next)?;
        Ok(outcome)
    }

    // Income & expenses.

    pub fn add_income(&mut self, draft: NewIncome) -> ServiceResult<EntryId> {
        self.apply(|ledger, clock| CashflowService::add_income(ledger, clock, draft))
    }

    pub fn edit_income(&mut self, id: &EntryId, draft: NewIncome) -> ServiceResult<()> {
        self.apply(|ledger, _| CashflowService::edit_income(ledger, id, draft))
    }

    pub fn delete_income(&mut self, id: &EntryId) -> ServiceResult<()> {
        self.apply(|ledger, _| CashflowService::delete_income(ledger, id))
    }

    pub fn add_expense(&mut self, draft: NewExpense) -> ServiceResult<EntryId> {
        self.apply(|ledger, clock| CashflowService::add_expense(ledger, clock, draft))
    }

    pub fn edit_expense(&mut self, id: &EntryId, draft: NewExpense) -> ServiceResult<()> {
        self.apply(|ledger, _| CashflowService::edit_expense(ledger, id, draft))
    }

    pub fn delete_expense(&mut self, id: &EntryId) -> ServiceResult<()> {
        self.apply(|ledger, _| CashflowService::delete_expense(ledger, id))
    }

    // Banks.

    pub fn add_bank(&mut self, name: &str, initial_balance: f64) -> ServiceResult<EntryId> {
        self.apply(|ledger, clock| BankService::add(ledger, clock, name, initial_balance))
    }

    pub fn edit_bank(&mut self, id: &EntryId, name: &str, balance: f64) -> ServiceResult<()> {
        self.apply(|ledger, _| BankService::edit(ledger, id, name, balance))
    }

    pub fn delete_bank(&mut self, id: &EntryId) -> ServiceResult<()> {
        self.apply(|ledger, _| BankService::remove(ledger, id))
    }

    pub fn set_bank_balance(&mut self, id: &EntryId, new_balance: f64) -> ServiceResult<()> {
        self.apply(|ledger, _| BankService::set_balance(ledger, id, new_balance))
    }

    // Installments.

    pub fn add_emi(&mut self, draft: NewEmi) -> ServiceResult<EntryId> {
        self.apply(|ledger, clock| EmiService::add(ledger, clock, draft))
    }

    pub fn edit_emi(&mut self, id: &EntryId, draft: NewEmi) -> ServiceResult<()> {
        self.apply(|ledger, _| EmiService::edit(ledger, id, draft))
    }

    pub fn delete_emi(&mut self, id: &EntryId) -> ServiceResult<()> {
        self.apply(|ledger, _| EmiService::remove(ledger, id))
    }

    pub fn confirm_emi_payment(
        &mut self,
        id: &EntryId,
        bank_id: Option<&EntryId>,
    ) -> ServiceResult<()> {
        self.apply(|ledger, clock| EmiService::confirm_payment(ledger, clock, id, bank_id))
    }

    pub fn force_close_emi(
        &mut self,
        id: &EntryId,
        closure_amount: f64,
        bank_id: Option<&EntryId>,
    ) -> ServiceResult<()> {
        self.apply(|ledger, clock| {
            EmiService::force_close(ledger, clock, id, closure_amount, bank_id)
        })
    }

    pub fn pending_emis(&self) -> Vec<&Emi> {
        EmiService::pending(&self.ledger, self.clock.today())
    }

    // Investments.

    pub fn rebase_investment(&mut self, class: AssetClass, amount: f64) -> ServiceResult<()> {
        self.apply(|ledger, clock| InvestmentService::rebase(ledger, clock, class, amount))
    }

    pub fn top_up_investment(&mut self, class: AssetClass, amount: f64) -> ServiceResult<()> {
        self.apply(|ledger, clock| InvestmentService::top_up(ledger, clock, class, amount))
    }

    pub fn set_initial_amount(&mut self, amount: f64) -> ServiceResult<()> {
        self.apply(|ledger, _| InvestmentService::set_initial_amount(ledger, amount))
    }

    // Fleet.

    pub fn add_car(&mut self, draft: NewCar) -> ServiceResult<EntryId> {
        self.apply(|ledger, clock| FleetService::add_car(ledger, clock, draft))
    }

    pub fn update_car(&mut self, id: &EntryId, draft: NewCar) -> ServiceResult<()> {
        self.apply(|ledger, _| FleetService::update_car(ledger, id, draft))
    }

    pub fn delete_car(&mut self, id: &EntryId) -> ServiceResult<()> {
        self.apply(|ledger, _| FleetService::remove_car(ledger, id))
    }

    pub fn add_business_entry(&mut self, draft: NewBusinessEntry) -> ServiceResult<EntryId> {
        self.apply(|ledger, clock| FleetService::add_entry(ledger, clock, draft))
    }

    pub fn edit_business_entry(
        &mut self,
        id: &EntryId,
        draft: NewBusinessEntry,
    ) -> ServiceResult<()> {
        self.apply(|ledger, _| FleetService::edit_entry(ledger, id, draft))
    }

    pub fn delete_business_entry(&mut self, id: &EntryId) -> ServiceResult<()> {
        self.apply(|ledger, _| FleetService::remove_entry(ledger, id))
    }

    pub fn add_driver(&mut self, name: &str) -> ServiceResult<EntryId> {
        self.apply(|ledger, clock| FleetService::add_driver(ledger, clock, name))
    }

    pub fn rename_driver(&mut self, id: &EntryId, name: &str) -> ServiceResult<()> {
        self.apply(|ledger, _| FleetService::rename_driver(ledger, id, name))
    }

    pub fn delete_driver(&mut self, id: &EntryId) -> ServiceResult<()> {
        self.apply(|ledger, _| FleetService::remove_driver(ledger, id))
    }

    pub fn set_business_cycle_day(&mut self, day: u32) -> ServiceResult<()> {
        self.apply(|ledger, _| FleetService::set_cycle_day(ledger, day))
    }

    pub fn confirm_car_emi_payment(
        &mut self,
        car_id: &EntryId,
        bank_id: Option<&EntryId>,
    ) -> ServiceResult<()> {
        self.apply(|ledger, clock| {
            FleetService::confirm_car_emi_payment(ledger, clock, car_id, bank_id)
        })
    }

    // Derived figures.

    pub fn totals(&self) -> LedgerTotals {
        SummaryService::totals(&self.ledger)
    }

    pub fn fleet_profit(&self) -> FleetProfit {
        FleetService::profit_stats(&self.ledger, self.clock.today())
    }

    pub fn fleet_emi_status(&self) -> Vec<FleetEmiStatus> {
        FleetService::emi_status(&self.ledger, self.clock.today())
    }

    pub fn business_entries(&self, window: EntryWindow) -> Vec<&BusinessEntry> {
        FleetService::entries_in(&self.ledger, window, self.clock.today())
    }

    pub fn take_monthly_snapshot(&mut self) -> ServiceResult<()> {
        self.apply(SummaryService::take_monthly_snapshot)
    }

    // Interchange.

    /// Validated all-or-nothing import: on success the whole state is
    /// replaced and persisted; on failure nothing changes.
    pub fn import_json(&mut self, raw: &str) -> ServiceResult<()> {
        let imported = backup::parse_backup(raw)?;
        self.commit(imported)
    }

    /// Replaces the whole state without validation (trusted caller path).
    pub fn replace(&mut self, ledger: Ledger) -> ServiceResult<()> {
        self.commit(ledger)
    }

    /// Writes a dated full-state backup into `dir` and returns its path.
    pub fn export_backup(&self, dir: &Path) -> ServiceResult<PathBuf> {
        Ok(backup::export_backup(&self.ledger, dir, self.clock.today())?)
    }

    /// Writes the audit log as CSV to `path`.
    pub fn export_history_csv(&self, path: &Path) -> ServiceResult<()> {
        Ok(backup::export_history_csv(&self.ledger.history, path)?)
    }

    /// Writes the current-cycle fleet report to `path`.
    pub fn export_cycle_report(&self, path: &Path) -> ServiceResult<()> {
        let report = FleetService::cycle_report(&self.ledger, self.clock.today());
        Ok(backup::write_cycle_report(&report, path)?)
    }
}
