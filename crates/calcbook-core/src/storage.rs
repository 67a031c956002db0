use calcbook_domain::{CalculationRecord, OwnerId, RecordId};

use crate::CoreError;

/// Abstraction over persistence backends capable of storing calculation records.
///
/// Implementations hold no ownership rules of their own; `get` and `delete`
/// work by identifier alone and the service applies the owner check.
pub trait RecordStore: Send + Sync {
    /// Persists a new record. Fails with [`CoreError::Storage`] if the id is taken.
    fn insert(&self, record: CalculationRecord) -> Result<RecordId, CoreError>;
    fn get(&self, id: RecordId) -> Result<Option<CalculationRecord>, CoreError>;
    /// Replaces an existing record. Fails with [`CoreError::NotFound`] if absent.
    fn update(&self, record: &CalculationRecord) -> Result<(), CoreError>;
    /// Removes a record, returning whether it existed.
    fn delete(&self, id: RecordId) -> Result<bool, CoreError>;
    fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<CalculationRecord>, CoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn insert(&self, record: CalculationRecord) -> Result<RecordId, CoreError> {
        (**self).insert(record)
    }

    fn get(&self, id: RecordId) -> Result<Option<CalculationRecord>, CoreError> {
        (**self).get(id)
    }

    fn update(&self, record: &CalculationRecord) -> Result<(), CoreError> {
        (**self).update(record)
    }

    fn delete(&self, id: RecordId) -> Result<bool, CoreError> {
        (**self).delete(id)
    }

    fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<CalculationRecord>, CoreError> {
        (**self).list_by_owner(owner_id)
    }
}
