pub mod bank_service;
pub mod cashflow_service;
pub mod emi_service;
pub mod fleet_service;
pub mod investment_service;
pub mod summary_service;

pub use bank_service::BankService;
pub use cashflow_service::CashflowService;
pub use emi_service::EmiService;
pub use fleet_service::{FleetEmiStatus, FleetProfit, FleetService};
pub use investment_service::InvestmentService;
pub use summary_service::{LedgerTotals, SummaryService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
