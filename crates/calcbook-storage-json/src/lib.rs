//! calcbook-storage-json
//!
//! Filesystem-backed [`RecordStore`] keeping every calculation in one JSON document.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use calcbook_core::{CoreError, RecordStore};
use calcbook_domain::{CalculationRecord, OwnerId, RecordId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;
const STORE_FILE: &str = "calculations.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Deserialize)]
struct StoreDocument {
    schema_version: u32,
    #[serde(default)]
    records: Vec<CalculationRecord>,
}

#[derive(Serialize)]
struct StoreDocumentRef<'a> {
    schema_version: u32,
    records: &'a [CalculationRecord],
}

/// JSON persistence for calculation records.
///
/// The document is loaded once on [`open`](Self::open) and rewritten
/// atomically (temp file + rename) after every mutation. A mutation whose
/// write fails leaves the in-memory view unchanged.
#[derive(Debug)]
pub struct JsonRecordStore {
    path: PathBuf,
    records: Mutex<Vec<CalculationRecord>>,
}

impl JsonRecordStore {
    /// Opens (or lazily creates) the store under `data_root`.
    pub fn open(data_root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let data_root = data_root.into();
        fs::create_dir_all(&data_root)?;
        let path = data_root.join(STORE_FILE);
        let records = if path.exists() {
            load_document(&path)?
        } else {
            Vec::new()
        };
        info!(path = %path.display(), count = records.len(), "calculation store opened");
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<CalculationRecord>>, CoreError> {
        self.records
            .lock()
            .map_err(|_| CoreError::Storage("record store lock poisoned".into()))
    }

    fn mutate<T, F>(&self, change: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Vec<CalculationRecord>) -> Result<T, CoreError>,
    {
        let mut guard = self.lock()?;
        let mut next = guard.clone();
        let outcome = change(&mut next)?;
        save_document(&self.path, &next)?;
        *guard = next;
        Ok(outcome)
    }
}

impl RecordStore for JsonRecordStore {
    fn insert(&self, record: CalculationRecord) -> Result<RecordId, CoreError> {
        self.mutate(|records| {
            let id = record.id;
            if records.iter().any(|existing| existing.id == id) {
                return Err(CoreError::Storage(format!("record {id} already exists")));
            }
            records.push(record);
            Ok(id)
        })
    }

    fn get(&self, id: RecordId) -> Result<Option<CalculationRecord>, CoreError> {
        Ok(self.lock()?.iter().find(|record| record.id == id).cloned())
    }

    fn update(&self, record: &CalculationRecord) -> Result<(), CoreError> {
        self.mutate(|records| {
            let slot = records
                .iter_mut()
                .find(|existing| existing.id == record.id)
                .ok_or(CoreError::NotFound(record.id))?;
            *slot = record.clone();
            Ok(())
        })
    }

    fn delete(&self, id: RecordId) -> Result<bool, CoreError> {
        if !self.lock()?.iter().any(|record| record.id == id) {
            return Ok(false);
        }
        self.mutate(|records| {
            let before = records.len();
            records.retain(|record| record.id != id);
            Ok(records.len() != before)
        })
    }

    fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<CalculationRecord>, CoreError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|record| record.is_owned_by(owner_id))
            .cloned()
            .collect())
    }
}

/// Loads records from a store document, rejecting unknown schema versions.
pub fn load_document(path: &Path) -> Result<Vec<CalculationRecord>, CoreError> {
    let data = fs::read_to_string(path)?;
    let document: StoreDocument =
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
    if document.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(CoreError::Storage(format!(
            "unsupported store schema version {} in {}",
            document.schema_version,
            path.display()
        )));
    }
    debug!(path = %path.display(), count = document.records.len(), "store document loaded");
    Ok(document.records)
}

/// Writes records as a store document, atomically replacing `path`.
pub fn save_document(path: &Path, records: &[CalculationRecord]) -> Result<(), CoreError> {
    let document = StoreDocumentRef {
        schema_version: CURRENT_SCHEMA_VERSION,
        records,
    };
    let json =
        serde_json::to_string_pretty(&document).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), count = records.len(), "store document saved");
    Ok(())
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

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
