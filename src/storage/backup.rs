//! Interchange surface: full-state JSON backups, validated import, and the
//! history CSV export.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::domain::history::HistoryEntry;
use crate::domain::ledger::{Ledger, CURRENT_SCHEMA_VERSION};
use crate::errors::LedgerError;
use crate::storage::Result;

/// Top-level keys a backup must carry, each as an array.
const REQUIRED_KEYS: [&str; 4] = ["income", "expenses", "emis", "banks"];

/// Writes the full ledger as a dated backup file and returns its path.
pub fn export_backup(ledger: &Ledger, dir: &Path, today: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("cashflow_backup_{}.json", today.format("%Y-%m-%d")));
    let json = serde_json::to_string_pretty(ledger)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Validates and parses a backup document.
///
/// The import is all-or-nothing: the document must parse, carry every
/// required collection as an array, and not come from a newer schema.
/// Callers replace their whole state with the result; on error nothing is
/// touched.
pub fn parse_backup(raw: &str) -> Result<Ledger> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|err| LedgerError::InvalidImport(format!("not valid JSON: {err}")))?;

    for key in REQUIRED_KEYS {
        match value.get(key) {
            None => {
                return Err(LedgerError::InvalidImport(format!(
                    "missing required key `{key}`"
                )))
            }
            Some(field) if !field.is_array() => {
                return Err(LedgerError::InvalidImport(format!(
                    "key `{key}` must be an array"
                )))
            }
            Some(_) => {}
        }
    }

    let ledger: Ledger = serde_json::from_value(value)
        .map_err(|err| LedgerError::InvalidImport(format!("unrecognized structure: {err}")))?;
    if ledger.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::InvalidImport(format!(
            "backup schema v{} is newer than supported v{}",
            ledger.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(ledger)
}

/// Writes the audit log as CSV (`Date,Type,Title,Amount,Category`), one row
/// per record, dates derived from the canonical timestamps.
pub fn export_history_csv(history: &[HistoryEntry], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_path(path)
        .map_err(|err| LedgerError::Persistence(format!("CSV export failed: {err}")))?;
    write_history_rows(&mut writer, history)
        .map_err(|err| LedgerError::Persistence(format!("CSV export failed: {err}")))?;
    Ok(())
}

fn write_history_rows<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    history: &[HistoryEntry],
) -> std::result::Result<(), csv::Error> {
    writer.write_record(["Date", "Type", "Title", "Amount", "Category"])?;
    for record in history {
        let kind = serde_json::to_value(record.kind)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        writer.write_record([
            record.timestamp.date_naive().to_string(),
            kind,
            record.title.clone(),
            record.amount.to_string(),
            record.category.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a plain-text report (see `FleetService::cycle_report`) for the
/// share sheet.
pub fn write_cycle_report(report: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, report)?;
    Ok(())
}
