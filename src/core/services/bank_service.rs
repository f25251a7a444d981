//! Bank account lifecycle commands.

use crate::core::clock::Clock;
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::bank::Bank;
use crate::domain::common::EntryId;
use crate::domain::ledger::Ledger;

pub struct BankService;

impl BankService {
    /// Adds a bank with an opening balance and returns its id.
    pub fn add(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        name: impl Into<String>,
        initial_balance: f64,
    ) -> ServiceResult<EntryId> {
        let id = EntryId::from_timestamp(clock.now());
        ledger.banks.push(Bank::new(id.clone(), name, initial_balance));
        Ok(id)
    }

    /// Replaces the bank's name and balance, preserving its id.
    pub fn edit(
        ledger: &mut Ledger,
        id: &EntryId,
        name: impl Into<String>,
        balance: f64,
    ) -> ServiceResult<()> {
        let bank = ledger
            .bank_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Bank not found".into()))?;
        bank.name = name.into();
        bank.balance = balance;
        Ok(())
    }

    /// Removes the bank. Entries and EMIs that referenced it keep their
    /// `bank_id`; later flows through it degrade to untracked cash.
    pub fn remove(ledger: &mut Ledger, id: &EntryId) -> ServiceResult<()> {
        let before = ledger.banks.len();
        ledger.banks.retain(|bank| &bank.id != id);
        if ledger.banks.len() == before {
            return Err(ServiceError::Invalid("Bank not found".into()));
        }
        Ok(())
    }

    /// Absolute balance override. A manual correction knob, not a flow, so
    /// it writes no audit record.
    pub fn set_balance(ledger: &mut Ledger, id: &EntryId, new_balance: f64) -> ServiceResult<()> {
        let bank = ledger
            .bank_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Bank not found".into()))?;
        bank.balance = new_balance;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn set_balance_overrides_without_history() {
        let mut ledger = Ledger::new();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap());
        let id = BankService::add(&mut ledger, &clock, "SBI", 1000.0).unwrap();

        BankService::set_balance(&mut ledger, &id, -50.0).unwrap();
        assert_eq!(ledger.bank(&id).unwrap().balance, -50.0);
        assert!(ledger.history.is_empty());
    }

    #[test]
    fn remove_fails_for_unknown_bank() {
        let mut ledger = Ledger::new();
        let err = BankService::remove(&mut ledger, &EntryId::new("missing"))
            .expect_err("remove must fail for unknown id");
        assert!(matches!(err, ServiceError::Invalid(ref message) if message.contains("not found")));
    }
}
