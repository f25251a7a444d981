use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::ledger::{Ledger, CURRENT_SCHEMA_VERSION};
use crate::errors::LedgerError;
use crate::storage::{Result, StorageBackend};

const TMP_SUFFIX: &str = "tmp";
const LEDGER_FILE: &str = "ledger.json";
const APP_DIR: &str = "cashflow";

/// Whole-document JSON persistence at a single fixed path.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Storage at the platform data directory (`<data_dir>/cashflow/ledger.json`).
    pub fn new_default() -> Result<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| LedgerError::Persistence("no platform data directory".into()))?;
        Ok(Self::new(base.join(APP_DIR).join(LEDGER_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<Ledger>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let ledger: Ledger = serde_json::from_str(&data)?;
        if ledger.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::Persistence(format!(
                "ledger schema v{} is newer than supported v{}",
                ledger.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(Some(ledger))
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("ledger.json"));
        (storage, temp)
    }

    #[test]
    fn missing_document_loads_as_none() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load().expect("load").is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut ledger = Ledger::new();
        ledger.initial_amount = 750.0;
        storage.save(&ledger).expect("save ledger");
        let loaded = storage.load().expect("load ledger").expect("document exists");
        assert_eq!(loaded.initial_amount, 750.0);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut ledger = Ledger::new();
        ledger.schema_version = CURRENT_SCHEMA_VERSION + 5;
        storage.save(&ledger).expect("save ledger");
        let err = storage.load().expect_err("future schema must fail");
        match err {
            LedgerError::Persistence(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}");
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
    }
}
