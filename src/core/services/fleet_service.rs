//! Taxi-fleet sub-ledger commands and cycle-scoped analytics.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::core::clock::Clock;
use crate::core::cycle::{cycle_start, month_key, shift_month, EntryWindow};
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::business::{
    BusinessEntry, Car, CarStatus, Driver, NewBusinessEntry, NewCar, ProfitSplit,
};
use crate::domain::common::EntryId;
use crate::domain::history::{HistoryEntry, HistoryKind};
use crate::domain::ledger::Ledger;

/// Cycle-scoped profit figures, net of installments serviced in the cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleetProfit {
    /// Owner's share after partner splits and debt service.
    pub my_profit: f64,
    /// Gross fleet profit less debt service, before partner splits.
    pub total_fleet_profit: f64,
}

/// Per-car installment status for the current cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetEmiStatus {
    pub car_id: EntryId,
    pub car_name: String,
    pub emi: f64,
    pub emi_date: NaiveDate,
    pub remaining_tenure: u32,
    pub total_tenure: u32,
    pub paid_this_cycle: bool,
}

pub struct FleetService;

impl FleetService {
    /// Registers a fleet vehicle. A deferred loan start shifts the first
    /// due date one month forward.
    pub fn add_car(ledger: &mut Ledger, clock: &dyn Clock, draft: NewCar) -> ServiceResult<EntryId> {
        let id = EntryId::from_timestamp(clock.now());
        let emi_date = if draft.emi_start_next_month {
            shift_month(draft.emi_date, 1)
        } else {
            draft.emi_date
        };
        let remaining = draft.remaining_tenure.unwrap_or(draft.total_tenure);
        ledger.business.cars.push(Car {
            id: id.clone(),
            name: draft.name,
            brand: draft.brand,
            year: draft.year,
            emi: draft.emi,
            emi_date,
            total_tenure: draft.total_tenure,
            remaining_tenure: remaining,
            emi_start_next_month: draft.emi_start_next_month,
            has_partner: draft.has_partner,
            partner_name: if draft.has_partner { draft.partner_name } else { String::new() },
            partner_share: if draft.has_partner { draft.partner_share } else { 0.0 },
            status: CarStatus::Active,
            last_paid_month: None,
        });
        Ok(id)
    }

    /// Replaces the car's details, preserving id and payment state. Stored
    /// entry splits are frozen facts and are not rewritten when partner
    /// terms change.
    pub fn update_car(ledger: &mut Ledger, id: &EntryId, draft: NewCar) -> ServiceResult<()> {
        let car = ledger
            .car_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Car not found".into()))?;
        car.name = draft.name;
        car.brand = draft.brand;
        car.year = draft.year;
        car.emi = draft.emi;
        car.emi_date = draft.emi_date;
        car.total_tenure = draft.total_tenure;
        if let Some(remaining) = draft.remaining_tenure {
            car.remaining_tenure = remaining;
        }
        car.has_partner = draft.has_partner;
        car.partner_name = if draft.has_partner { draft.partner_name } else { String::new() };
        car.partner_share = if draft.has_partner { draft.partner_share } else { 0.0 };
        Ok(())
    }

    /// Removes the car and every entry recorded against it.
    pub fn remove_car(ledger: &mut Ledger, id: &EntryId) -> ServiceResult<()> {
        let before = ledger.business.cars.len();
        ledger.business.cars.retain(|car| &car.id != id);
        if ledger.business.cars.len() == before {
            return Err(ServiceError::Invalid("Car not found".into()));
        }
        ledger.business.entries.retain(|entry| &entry.car_id != id);
        Ok(())
    }

    /// Records a revenue/cost entry for a car, freezing the profit split
    /// under the car's partner terms as they stand now. An unknown driver
    /// id degrades to an unnamed driver.
    pub fn add_entry(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        draft: NewBusinessEntry,
    ) -> ServiceResult<EntryId> {
        let id = EntryId::from_timestamp(clock.now());
        let entry = Self::build_entry(ledger, id.clone(), draft)?;
        ledger.business.entries.insert(0, entry);
        Ok(id)
    }

    /// Replaces an entry, recomputing its split under the car's current
    /// terms (older siblings keep their frozen splits).
    pub fn edit_entry(
        ledger: &mut Ledger,
        id: &EntryId,
        draft: NewBusinessEntry,
    ) -> ServiceResult<()> {
        let position = ledger
            .business
            .entries
            .iter()
            .position(|entry| &entry.id == id)
            .ok_or_else(|| ServiceError::Invalid("Business entry not found".into()))?;
        let replacement = Self::build_entry(ledger, id.clone(), draft)?;
        ledger.business.entries[position] = replacement;
        Ok(())
    }

    pub fn remove_entry(ledger: &mut Ledger, id: &EntryId) -> ServiceResult<()> {
        let before = ledger.business.entries.len();
        ledger.business.entries.retain(|entry| &entry.id != id);
        if ledger.business.entries.len() == before {
            return Err(ServiceError::Invalid("Business entry not found".into()));
        }
        Ok(())
    }

    fn build_entry(
        ledger: &Ledger,
        id: EntryId,
        draft: NewBusinessEntry,
    ) -> ServiceResult<BusinessEntry> {
        let car = ledger
            .car(&draft.car_id)
            .ok_or_else(|| ServiceError::Invalid("Car not found".into()))?;
        let split = ProfitSplit::compute(
            draft.kind,
            draft.amount,
            draft.cng,
            draft.drivers,
            car.partner_terms(),
        );
        let driver_name = draft
            .driver_id
            .as_ref()
            .and_then(|driver_id| ledger.driver(driver_id))
            .map(|driver| driver.name.clone())
            .unwrap_or_default();
        Ok(BusinessEntry {
            id,
            car_id: draft.car_id,
            car_name: car.name.clone(),
            date: draft.date,
            kind: draft.kind,
            amount: draft.amount,
            cng: draft.cng,
            drivers: draft.drivers,
            driver_id: draft.driver_id,
            driver_name,
            uber_commission: draft.uber_commission,
            uber_commission_basis: draft.uber_commission_basis,
            split,
        })
    }

    pub fn add_driver(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        name: impl Into<String>,
    ) -> ServiceResult<EntryId> {
        let id = EntryId::from_timestamp(clock.now());
        ledger.business.drivers.push(Driver {
            id: id.clone(),
            name: name.into(),
        });
        Ok(id)
    }

    pub fn rename_driver(
        ledger: &mut Ledger,
        id: &EntryId,
        name: impl Into<String>,
    ) -> ServiceResult<()> {
        let driver = ledger
            .business
            .drivers
            .iter_mut()
            .find(|driver| &driver.id == id)
            .ok_or_else(|| ServiceError::Invalid("Driver not found".into()))?;
        driver.name = name.into();
        Ok(())
    }

    /// Removes the driver; entries keep their recorded `driver_name`.
    pub fn remove_driver(ledger: &mut Ledger, id: &EntryId) -> ServiceResult<()> {
        let before = ledger.business.drivers.len();
        ledger.business.drivers.retain(|driver| &driver.id != id);
        if ledger.business.drivers.len() == before {
            return Err(ServiceError::Invalid("Driver not found".into()));
        }
        Ok(())
    }

    /// Moves the day-of-month the accounting window opens on.
    pub fn set_cycle_day(ledger: &mut Ledger, day: u32) -> ServiceResult<()> {
        if !(1..=31).contains(&day) {
            return Err(ServiceError::Invalid("Cycle day must be within 1..=31".into()));
        }
        ledger.business.cycle_day = day;
        Ok(())
    }

    /// Confirms this month's installment on a fleet vehicle: counts the
    /// tenure down (floor zero), advances the due date one month, stamps
    /// the payment month, debits the bank when it resolves, and writes an
    /// audit record carrying the car's id for cycle-scoped joins.
    pub fn confirm_car_emi_payment(
        ledger: &mut Ledger,
        clock: &dyn Clock,
        car_id: &EntryId,
        bank_id: Option<&EntryId>,
    ) -> ServiceResult<()> {
        let at = clock.now();
        let paid_month = month_key(at.date_naive());
        let (name, amount) = {
            let car = ledger
                .car_mut(car_id)
                .ok_or_else(|| ServiceError::Invalid("Car not found".into()))?;
            car.remaining_tenure = car.remaining_tenure.saturating_sub(1);
            car.emi_date = shift_month(car.emi_date, 1);
            car.last_paid_month = Some(paid_month);
            (car.name.clone(), car.emi)
        };

        ledger.route_through_bank(bank_id, -amount);

        tracing::debug!(car = %car_id, %name, "fleet installment payment confirmed");
        ledger.push_history(
            HistoryEntry::new(at, HistoryKind::EmiPayment, name, amount, "business")
                .with_car(car_id.clone())
                .with_bank(bank_id.cloned()),
        );
        Ok(())
    }

    /// Entries whose date falls inside the requested window.
    pub fn entries_in<'a>(
        ledger: &'a Ledger,
        window: EntryWindow,
        today: NaiveDate,
    ) -> Vec<&'a BusinessEntry> {
        let cutoff = window.cutoff(ledger.business.cycle_day, today);
        ledger
            .business
            .entries
            .iter()
            .filter(|entry| cutoff.map_or(true, |start| entry.date >= start))
            .collect()
    }

    /// Cycle-scoped profit: entry profits summed over the current window,
    /// with every installment payment recorded inside the window subtracted
    /// from both the owner's share and the gross fleet figure.
    pub fn profit_stats(ledger: &Ledger, today: NaiveDate) -> FleetProfit {
        let start = cycle_start(ledger.business.cycle_day, today);
        let mut gross = 0.0;
        let mut mine = 0.0;
        for entry in &ledger.business.entries {
            if entry.date >= start {
                gross += entry.split.profit;
                mine += entry.split.my_portion;
            }
        }
        let debt_service: f64 = ledger
            .history
            .iter()
            .filter(|record| {
                record.kind == HistoryKind::EmiPayment && record.timestamp.date_naive() >= start
            })
            .map(|record| record.amount)
            .sum();
        FleetProfit {
            my_profit: mine - debt_service,
            total_fleet_profit: gross - debt_service,
        }
    }

    /// Per-car paid/unpaid state for the current cycle, joined on the
    /// `car_id` carried by installment audit records.
    pub fn emi_status(ledger: &Ledger, today: NaiveDate) -> Vec<FleetEmiStatus> {
        let start = cycle_start(ledger.business.cycle_day, today);
        ledger
            .business
            .cars
            .iter()
            .map(|car| {
                let paid = ledger.history.iter().any(|record| {
                    record.kind == HistoryKind::EmiPayment
                        && record.car_id.as_ref() == Some(&car.id)
                        && record.timestamp.date_naive() >= start
                });
                FleetEmiStatus {
                    car_id: car.id.clone(),
                    car_name: car.name.clone(),
                    emi: car.emi,
                    emi_date: car.emi_date,
                    remaining_tenure: car.remaining_tenure,
                    total_tenure: car.total_tenure,
                    paid_this_cycle: paid,
                }
            })
            .collect()
    }

    /// Plain-text summary of the current cycle, suitable for sharing.
    pub fn cycle_report(ledger: &Ledger, today: NaiveDate) -> String {
        let stats = Self::profit_stats(ledger, today);
        let mut report = String::new();
        let _ = writeln!(
            report,
            "Business Report - Cycle starting day {}",
            ledger.business.cycle_day
        );
        let _ = writeln!(report);
        let _ = writeln!(report, "My Net Profit: {:.2}", stats.my_profit);
        let _ = writeln!(report, "Total Fleet Profit: {:.2}", stats.total_fleet_profit);
        let _ = writeln!(report);
        let _ = writeln!(report, "Entries:");
        for entry in Self::entries_in(ledger, EntryWindow::Cycle, today) {
            let _ = writeln!(
                report,
                "{} - {}: {:.2}",
                entry.date, entry.car_name, entry.split.my_portion
            );
        }
        report
    }
}
