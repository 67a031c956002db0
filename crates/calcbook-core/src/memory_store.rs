use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use calcbook_domain::{CalculationRecord, OwnerId, RecordId};

use crate::{storage::RecordStore, CoreError};

type RecordMap = HashMap<RecordId, CalculationRecord>;

/// Process-local record store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<RecordMap>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RecordMap>, CoreError> {
        self.records
            .read()
            .map_err(|_| CoreError::Storage("record store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RecordMap>, CoreError> {
        self.records
            .write()
            .map_err(|_| CoreError::Storage("record store lock poisoned".into()))
    }
}

impl RecordStore for InMemoryRecordStore {
    fn insert(&self, record: CalculationRecord) -> Result<RecordId, CoreError> {
        let mut records = self.write()?;
        let id = record.id;
        if records.contains_key(&id) {
            return Err(CoreError::Storage(format!("record {id} already exists")));
        }
        records.insert(id, record);
        Ok(id)
    }

    fn get(&self, id: RecordId) -> Result<Option<CalculationRecord>, CoreError> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn update(&self, record: &CalculationRecord) -> Result<(), CoreError> {
        let mut records = self.write()?;
        let slot = records
            .get_mut(&record.id)
            .ok_or(CoreError::NotFound(record.id))?;
        *slot = record.clone();
        Ok(())
    }

    fn delete(&self, id: RecordId) -> Result<bool, CoreError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<CalculationRecord>, CoreError> {
        Ok(self
            .read()?
            .values()
            .filter(|record| record.is_owned_by(owner_id))
            .cloned()
            .collect())
    }
}
