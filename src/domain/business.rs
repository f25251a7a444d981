use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{EntryId, Identifiable, NamedEntity};

/// Flat platform charge withheld per driver on commission entries.
pub const PLATFORM_FEE_PER_DRIVER: f64 = 100.0;

/// The taxi-fleet sub-ledger: vehicles, drivers, and revenue/cost entries,
/// aggregated over a rolling monthly cycle anchored at `cycle_day`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub entries: Vec<BusinessEntry>,
    /// Day of month the profit-accounting window opens.
    #[serde(default = "Business::default_cycle_day")]
    pub cycle_day: u32,
}

impl Business {
    pub fn default_cycle_day() -> u32 {
        5
    }
}

impl Default for Business {
    fn default() -> Self {
        Self {
            cars: Vec::new(),
            drivers: Vec::new(),
            entries: Vec::new(),
            cycle_day: Self::default_cycle_day(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    Active,
    Retired,
}

impl Default for CarStatus {
    fn default() -> Self {
        CarStatus::Active
    }
}

/// A fleet vehicle with its own installment cycle, independent of the
/// generic EMI list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub year: String,
    /// Monthly installment amount on the vehicle loan.
    pub emi: f64,
    /// Next installment due date; advanced one month per confirmed payment.
    pub emi_date: NaiveDate,
    pub total_tenure: u32,
    pub remaining_tenure: u32,
    #[serde(default)]
    pub emi_start_next_month: bool,
    #[serde(default)]
    pub has_partner: bool,
    #[serde(default)]
    pub partner_name: String,
    /// Partner's percentage of entry profit, 0 when there is no partner.
    #[serde(default)]
    pub partner_share: f64,
    #[serde(default)]
    pub status: CarStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_paid_month: Option<String>,
}

/// Caller-supplied fields for a new or replacement car.
#[derive(Debug, Clone)]
pub struct NewCar {
    pub name: String,
    pub brand: String,
    pub year: String,
    pub emi: f64,
    pub emi_date: NaiveDate,
    pub total_tenure: u32,
    pub remaining_tenure: Option<u32>,
    pub emi_start_next_month: bool,
    pub has_partner: bool,
    pub partner_name: String,
    pub partner_share: f64,
}

impl Car {
    /// The partner percentage, when a partner is attached.
    pub fn partner_terms(&self) -> Option<f64> {
        self.has_partner.then_some(self.partner_share)
    }
}

impl Identifiable for Car {
    fn id(&self) -> &EntryId {
        &self.id
    }
}

impl NamedEntity for Car {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub id: EntryId,
    pub name: String,
}

impl Identifiable for Driver {
    fn id(&self) -> &EntryId {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BusinessEntryKind {
    /// Pass-through rent collected for the vehicle.
    Rent,
    /// Ride earnings split between driver(s) and owner.
    Commission,
    /// A pure cost.
    Maintenance,
}

/// How the ride platform's commission was expressed on a commission entry.
/// Informational only: the platform payout already arrives net of it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommissionBasis {
    Percentage,
    Fixed,
}

impl Default for CommissionBasis {
    fn default() -> Self {
        CommissionBasis::Percentage
    }
}

/// Profit breakdown frozen at entry-recording time.
///
/// The split captures the formula output under the car's partner terms as
/// they stood when the entry was recorded. Changing those terms later never
/// rewrites stored splits; an entry is an immutable fact about what
/// happened.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfitSplit {
    pub driver_portion: f64,
    pub platform_fee: f64,
    pub profit: f64,
    pub partner_portion: f64,
    pub my_portion: f64,
}

impl ProfitSplit {
    /// Computes the frozen breakdown for an entry.
    ///
    /// Rent passes through as profit; commission splits earnings-less-fuel
    /// 50/50 with the driver(s) and withholds a flat per-driver platform
    /// fee; maintenance is a pure cost. `partner_share` is the partner's
    /// percentage of the resulting profit, if any.
    pub fn compute(
        kind: BusinessEntryKind,
        amount: f64,
        cng: f64,
        drivers: u32,
        partner_share: Option<f64>,
    ) -> Self {
        let mut split = match kind {
            BusinessEntryKind::Rent => ProfitSplit {
                profit: amount,
                ..Default::default()
            },
            BusinessEntryKind::Commission => {
                let driver_portion = (amount - cng) / 2.0;
                let platform_fee = PLATFORM_FEE_PER_DRIVER * f64::from(drivers);
                ProfitSplit {
                    driver_portion,
                    platform_fee,
                    profit: driver_portion * f64::from(drivers) - platform_fee,
                    ..Default::default()
                }
            }
            BusinessEntryKind::Maintenance => ProfitSplit {
                profit: -amount,
                ..Default::default()
            },
        };
        match partner_share {
            Some(share) => {
                split.partner_portion = split.profit * share / 100.0;
                split.my_portion = split.profit - split.partner_portion;
            }
            None => split.my_portion = split.profit,
        }
        split
    }
}

/// A recorded revenue/cost event for a fleet vehicle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessEntry {
    pub id: EntryId,
    pub car_id: EntryId,
    pub car_name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: BusinessEntryKind,
    pub amount: f64,
    #[serde(default)]
    pub cng: f64,
    #[serde(default = "one")]
    pub drivers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<EntryId>,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub uber_commission: f64,
    #[serde(rename = "uberCommissionType", default)]
    pub uber_commission_basis: CommissionBasis,
    #[serde(flatten)]
    pub split: ProfitSplit,
}

fn one() -> u32 {
    1
}

/// Caller-supplied fields for a new or replacement business entry. The
/// profit split is computed by the service, never by the caller.
#[derive(Debug, Clone)]
pub struct NewBusinessEntry {
    pub car_id: EntryId,
    pub date: NaiveDate,
    pub kind: BusinessEntryKind,
    pub amount: f64,
    pub cng: f64,
    pub drivers: u32,
    pub driver_id: Option<EntryId>,
    pub uber_commission: f64,
    pub uber_commission_basis: CommissionBasis,
}

impl Identifiable for BusinessEntry {
    fn id(&self) -> &EntryId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commission_split_matches_formula() {
        let split = ProfitSplit::compute(BusinessEntryKind::Commission, 1000.0, 200.0, 2, None);
        assert_eq!(split.driver_portion, 400.0);
        assert_eq!(split.platform_fee, 200.0);
        assert_eq!(split.profit, 600.0);
        assert_eq!(split.my_portion, 600.0);
    }

    #[test]
    fn partner_share_divides_profit() {
        let split =
            ProfitSplit::compute(BusinessEntryKind::Commission, 1000.0, 200.0, 2, Some(50.0));
        assert_eq!(split.partner_portion, 300.0);
        assert_eq!(split.my_portion, 300.0);
    }

    #[test]
    fn rent_and_maintenance_pass_through() {
        let rent = ProfitSplit::compute(BusinessEntryKind::Rent, 500.0, 0.0, 1, None);
        assert_eq!(rent.profit, 500.0);
        assert_eq!(rent.platform_fee, 0.0);

        let repair = ProfitSplit::compute(BusinessEntryKind::Maintenance, 500.0, 0.0, 1, None);
        assert_eq!(repair.profit, -500.0);
        assert_eq!(repair.my_portion, -500.0);
    }
}
