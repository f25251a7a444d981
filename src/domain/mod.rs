//! Ledger domain models: the persisted document and its sub-aggregates.

pub mod bank;
pub mod business;
pub mod common;
pub mod emi;
pub mod entry;
pub mod history;
pub mod investment;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use bank::Bank;
pub use business::{
    Business, BusinessEntry, BusinessEntryKind, Car, CarStatus, CommissionBasis, Driver,
    NewBusinessEntry, NewCar, ProfitSplit, PLATFORM_FEE_PER_DRIVER,
};
pub use common::{EntryId, Identifiable, NamedEntity};
pub use emi::{Emi, EmiKind, EmiStatus, NewEmi};
pub use entry::{ExpenseEntry, IncomeEntry, NewExpense, NewIncome};
pub use history::{HistoryEntry, HistoryKind, InvestmentAction, MonthlySnapshot};
pub use investment::{AssetClass, Investments};
pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION, SNAPSHOT_RETENTION};
