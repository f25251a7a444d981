mod common;

use cashflow_core::core::cycle::{cycle_start, EntryWindow};
use cashflow_core::domain::business::BusinessEntryKind;
use chrono::{TimeZone, Utc};
use common::*;

#[test]
fn commission_entry_records_the_split_formula() {
    let (mut store, _guard) = open_store(manual_clock(2026, 4, 10));
    let car_id = store.add_car(car("Swift 001")).unwrap();
    let entry_id = store
        .add_business_entry(commission_entry(&car_id, 1000.0, 200.0, 2, date(2026, 4, 9)))
        .unwrap();

    let entry = store.ledger().business_entry(&entry_id).unwrap();
    assert_eq!(entry.split.driver_portion, 400.0);
    assert_eq!(entry.split.platform_fee, 200.0);
    assert_eq!(entry.split.profit, 600.0);
    assert_eq!(entry.split.my_portion, 600.0);
    assert_eq!(entry.split.partner_portion, 0.0);
}

#[test]
fn commission_split_honors_partner_share() {
    let (mut store, _guard) = open_store(manual_clock(2026, 4, 10));
    let mut draft = car("Swift 001");
    draft.has_partner = true;
    draft.partner_name = "Ravi".into();
    draft.partner_share = 50.0;
    let car_id = store.add_car(draft).unwrap();

    let entry_id = store
        .add_business_entry(commission_entry(&car_id, 1000.0, 200.0, 2, date(2026, 4, 9)))
        .unwrap();

    let entry = store.ledger().business_entry(&entry_id).unwrap();
    assert_eq!(entry.split.partner_portion, 300.0);
    assert_eq!(entry.split.my_portion, 300.0);
}

#[test]
fn rent_and_maintenance_entries_pass_through() {
    let (mut store, _guard) = open_store(manual_clock(2026, 4, 10));
    let car_id = store.add_car(car("Swift 001")).unwrap();

    let rent = store
        .add_business_entry(simple_entry(&car_id, BusinessEntryKind::Rent, 500.0, date(2026, 4, 9)))
        .unwrap();
    let repair = store
        .add_business_entry(simple_entry(
            &car_id,
            BusinessEntryKind::Maintenance,
            500.0,
            date(2026, 4, 9),
        ))
        .unwrap();

    assert_eq!(store.ledger().business_entry(&rent).unwrap().split.profit, 500.0);
    assert_eq!(
        store.ledger().business_entry(&repair).unwrap().split.profit,
        -500.0
    );
}

#[test]
fn cycle_boundary_flips_around_the_cycle_day() {
    // Day 3, before the 5th: the window opened on the previous month's 5th.
    assert_eq!(cycle_start(5, date(2026, 6, 3)), date(2026, 5, 5));
    // Day 10, after the 5th: the window opened this month.
    assert_eq!(cycle_start(5, date(2026, 6, 10)), date(2026, 6, 5));
}

#[test]
fn profit_stats_scope_to_the_cycle_and_subtract_debt_service() {
    let clock = manual_clock(2026, 4, 10);
    let (mut store, _guard) = open_store(clock.clone());
    let car_id = store.add_car(car("Swift 001")).unwrap();

    // Previous cycle (before April 5th): must not count.
    store
        .add_business_entry(simple_entry(&car_id, BusinessEntryKind::Rent, 999.0, date(2026, 4, 2)))
        .unwrap();
    // Current cycle: 600 profit from commission + 500 rent.
    store
        .add_business_entry(commission_entry(&car_id, 1000.0, 200.0, 2, date(2026, 4, 9)))
        .unwrap();
    store
        .add_business_entry(simple_entry(&car_id, BusinessEntryKind::Rent, 500.0, date(2026, 4, 8)))
        .unwrap();

    let before = store.fleet_profit();
    assert_eq!(before.total_fleet_profit, 1100.0);
    assert_eq!(before.my_profit, 1100.0);

    // Debt service inside the cycle reduces both figures.
    store.confirm_car_emi_payment(&car_id, None).unwrap();
    let after = store.fleet_profit();
    assert_eq!(after.total_fleet_profit, 1100.0 - 9000.0);
    assert_eq!(after.my_profit, 1100.0 - 9000.0);
}

#[test]
fn car_payment_advances_due_date_and_marks_cycle_paid() {
    let clock = manual_clock(2026, 4, 10);
    let (mut store, _guard) = open_store(clock.clone());
    let car_id = store.add_car(car("Swift 001")).unwrap();

    store.confirm_car_emi_payment(&car_id, None).unwrap();

    let paid_car = store.ledger().car(&car_id).unwrap();
    assert_eq!(paid_car.remaining_tenure, 35);
    assert_eq!(paid_car.emi_date, date(2026, 5, 12));
    assert_eq!(paid_car.last_paid_month.as_deref(), Some("2026-04"));

    let status = store.fleet_emi_status();
    assert!(status[0].paid_this_cycle);

    // Next cycle: the payment falls out of the window again.
    clock.set(Utc.with_ymd_and_hms(2026, 5, 6, 9, 0, 0).unwrap());
    let status = store.fleet_emi_status();
    assert!(!status[0].paid_this_cycle);
}

#[test]
fn entry_windows_filter_by_date() {
    let clock = manual_clock(2026, 4, 10);
    let (mut store, _guard) = open_store(clock.clone());
    let car_id = store.add_car(car("Swift 001")).unwrap();

    store
        .add_business_entry(simple_entry(&car_id, BusinessEntryKind::Rent, 10.0, date(2026, 4, 10)))
        .unwrap();
    store
        .add_business_entry(simple_entry(&car_id, BusinessEntryKind::Rent, 20.0, date(2026, 4, 6)))
        .unwrap();
    store
        .add_business_entry(simple_entry(&car_id, BusinessEntryKind::Rent, 30.0, date(2026, 3, 20)))
        .unwrap();

    assert_eq!(store.business_entries(EntryWindow::Daily).len(), 1);
    assert_eq!(store.business_entries(EntryWindow::Weekly).len(), 2);
    // Cycle opened April 5th: the March entry is out.
    assert_eq!(store.business_entries(EntryWindow::Cycle).len(), 2);
    assert_eq!(store.business_entries(EntryWindow::All).len(), 3);
}

#[test]
fn cycle_report_lists_cycle_entries_and_net_figures() {
    let (mut store, temp) = open_store(manual_clock(2026, 4, 10));
    let car_id = store.add_car(car("Swift 001")).unwrap();
    store
        .add_business_entry(simple_entry(&car_id, BusinessEntryKind::Rent, 500.0, date(2026, 4, 8)))
        .unwrap();

    let path = temp.path().join("report.txt");
    store.export_cycle_report(&path).unwrap();
    let report = std::fs::read_to_string(&path).unwrap();
    assert!(report.contains("Cycle starting day 5"));
    assert!(report.contains("My Net Profit: 500.00"));
    assert!(report.contains("Swift 001: 500.00"));
}

#[test]
fn unknown_driver_degrades_to_unnamed() {
    let (mut store, _guard) = open_store(manual_clock(2026, 4, 10));
    let car_id = store.add_car(car("Swift 001")).unwrap();
    let mut draft = commission_entry(&car_id, 800.0, 100.0, 1, date(2026, 4, 9));
    draft.driver_id = Some("ghost".into());

    let entry_id = store.add_business_entry(draft).unwrap();
    let entry = store.ledger().business_entry(&entry_id).unwrap();
    assert_eq!(entry.driver_name, "");
    assert_eq!(entry.driver_id.as_ref().map(|id| id.as_str()), Some("ghost"));
}

#[test]
fn drivers_attach_names_at_entry_time() {
    let (mut store, _guard) = open_store(manual_clock(2026, 4, 10));
    let car_id = store.add_car(car("Swift 001")).unwrap();
    let driver_id = store.add_driver("Mahesh").unwrap();
    let mut draft = commission_entry(&car_id, 800.0, 100.0, 1, date(2026, 4, 9));
    draft.driver_id = Some(driver_id.clone());
    let entry_id = store.add_business_entry(draft).unwrap();

    // Removing the driver later keeps the recorded name on the entry.
    store.delete_driver(&driver_id).unwrap();
    let entry = store.ledger().business_entry(&entry_id).unwrap();
    assert_eq!(entry.driver_name, "Mahesh");
}

#[test]
fn moving_the_cycle_day_moves_the_window() {
    let clock = manual_clock(2026, 4, 10);
    let (mut store, _guard) = open_store(clock.clone());
    let car_id = store.add_car(car("Swift 001")).unwrap();
    store
        .add_business_entry(simple_entry(&car_id, BusinessEntryKind::Rent, 75.0, date(2026, 4, 2)))
        .unwrap();

    // With the default cycle day (5) the April 2nd entry is out of cycle.
    assert_eq!(store.business_entries(EntryWindow::Cycle).len(), 0);

    store.set_business_cycle_day(1).unwrap();
    assert_eq!(store.business_entries(EntryWindow::Cycle).len(), 1);

    assert!(store.set_business_cycle_day(0).is_err());
    assert!(store.set_business_cycle_day(32).is_err());
}
