//! Shared builders for the integration suites.
#![allow(dead_code)]

use std::sync::Arc;

use cashflow_core::core::clock::ManualClock;
use cashflow_core::domain::business::{BusinessEntryKind, CommissionBasis, NewBusinessEntry, NewCar};
use cashflow_core::domain::common::EntryId;
use cashflow_core::domain::emi::{EmiKind, NewEmi};
use cashflow_core::domain::entry::{NewExpense, NewIncome};
use cashflow_core::storage::JsonStorage;
use cashflow_core::store::LedgerStore;
use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn manual_clock(y: i32, m: u32, d: u32) -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap(),
    ))
}

/// Store over a throwaway file; keep the guard alive for the test's life.
pub fn open_store(clock: Arc<ManualClock>) -> (LedgerStore, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let storage = JsonStorage::new(temp.path().join("ledger.json"));
    (LedgerStore::open(Box::new(storage), clock), temp)
}

pub fn income(name: &str, amount: f64, bank_id: Option<EntryId>) -> NewIncome {
    NewIncome {
        name: name.into(),
        amount,
        source: "Salary".into(),
        date: date(2026, 4, 10),
        bank_id,
    }
}

pub fn expense(name: &str, amount: f64, bank_id: Option<EntryId>) -> NewExpense {
    NewExpense {
        name: name.into(),
        amount,
        category: "Food".into(),
        date: date(2026, 4, 10),
        bank_id,
    }
}

pub fn loan(name: &str, amount: f64, tenure: u32) -> NewEmi {
    NewEmi {
        name: name.into(),
        amount,
        kind: EmiKind::Debt,
        tenure: Some(tenure),
        remaining_tenure: None,
        start_date: date(2026, 4, 5),
        start_next_month: false,
        bank_id: None,
    }
}

pub fn evergreen(name: &str, amount: f64, kind: EmiKind) -> NewEmi {
    NewEmi {
        name: name.into(),
        amount,
        kind,
        tenure: None,
        remaining_tenure: None,
        start_date: date(2026, 4, 5),
        start_next_month: false,
        bank_id: None,
    }
}

pub fn car(name: &str) -> NewCar {
    NewCar {
        name: name.into(),
        brand: "Maruti".into(),
        year: "2023".into(),
        emi: 9000.0,
        emi_date: date(2026, 4, 12),
        total_tenure: 48,
        remaining_tenure: Some(36),
        emi_start_next_month: false,
        has_partner: false,
        partner_name: String::new(),
        partner_share: 0.0,
    }
}

pub fn commission_entry(
    car_id: &EntryId,
    amount: f64,
    cng: f64,
    drivers: u32,
    on: NaiveDate,
) -> NewBusinessEntry {
    NewBusinessEntry {
        car_id: car_id.clone(),
        date: on,
        kind: BusinessEntryKind::Commission,
        amount,
        cng,
        drivers,
        driver_id: None,
        uber_commission: 20.0,
        uber_commission_basis: CommissionBasis::Percentage,
    }
}

pub fn simple_entry(
    car_id: &EntryId,
    kind: BusinessEntryKind,
    amount: f64,
    on: NaiveDate,
) -> NewBusinessEntry {
    NewBusinessEntry {
        car_id: car_id.clone(),
        date: on,
        kind,
        amount,
        cng: 0.0,
        drivers: 1,
        driver_id: None,
        uber_commission: 0.0,
        uber_commission_basis: CommissionBasis::Fixed,
    }
}
