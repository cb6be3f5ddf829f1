//! File-backed patient store
//!
//! One JSON file holds a mapping from patient id to record. Every call
//! re-reads the file and mutations rewrite it whole. A `BTreeMap` keeps the
//! on-disk iteration order stable (sorted by id), which is the tie-break
//! order for /sort.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::models::PatientRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt data file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Storage capability the handlers depend on. Each call is an independent
/// load (and, for mutations, rewrite) of the backing file; there is no
/// atomicity across a get/upsert pair.
pub trait PatientStore: Send + Sync {
    fn load_all(&self) -> Result<BTreeMap<String, PatientRecord>, StoreError>;
    fn get(&self, id: &str) -> Result<Option<PatientRecord>, StoreError>;
    fn upsert(&self, id: &str, record: PatientRecord) -> Result<(), StoreError>;
    /// Returns true if the record existed.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn save(&self, data: &BTreeMap<String, PatientRecord>) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(data)?)?;
        Ok(())
    }
}

impl PatientStore for JsonFileStore {
    fn load_all(&self) -> Result<BTreeMap<String, PatientRecord>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            // A missing file is an empty store
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, id: &str) -> Result<Option<PatientRecord>, StoreError> {
        Ok(self.load_all()?.remove(id))
    }

    fn upsert(&self, id: &str, record: PatientRecord) -> Result<(), StoreError> {
        let mut data = self.load_all()?;
        data.insert(id.to_string(), record);
        self.save(&data)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut data = self.load_all()?;
        let existed = data.remove(id).is_some();
        if existed {
            self.save(&data)?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, bmi, verdict};

    fn record(weight: f64, height: f64) -> PatientRecord {
        let b = bmi(weight, height);
        PatientRecord {
            name: "Test".to_string(),
            city: "Delhi".to_string(),
            age: 40,
            gender: Gender::Male,
            height,
            weight,
            bmi: b,
            verdict: verdict(b).to_string(),
        }
    }

    fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("patients.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let (_dir, store) = temp_store();
        assert!(store.load_all().unwrap().is_empty());
        assert!(store.get("P001").unwrap().is_none());
    }

    #[test]
    fn test_upsert_and_get_round_trip() {
        let (_dir, store) = temp_store();
        store.upsert("P001", record(70.0, 1.75)).unwrap();
        store.upsert("P002", record(55.0, 1.6)).unwrap();

        let loaded = store.get("P001").unwrap().unwrap();
        assert_eq!(loaded.bmi, 22.86);
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = temp_store();
        store.upsert("P001", record(70.0, 1.75)).unwrap();

        assert!(store.delete("P001").unwrap());
        assert!(!store.delete("P001").unwrap());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_iteration_order_is_id_order() {
        let (_dir, store) = temp_store();
        store.upsert("P003", record(70.0, 1.75)).unwrap();
        store.upsert("P001", record(55.0, 1.6)).unwrap();
        store.upsert("P002", record(80.0, 1.8)).unwrap();

        let ids: Vec<String> = store.load_all().unwrap().into_keys().collect();
        assert_eq!(ids, vec!["P001", "P002", "P003"]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (_dir, store) = temp_store();
        fs::write(store.path.clone(), "not json").unwrap();
        assert!(matches!(store.load_all(), Err(StoreError::Parse(_))));
    }
}
