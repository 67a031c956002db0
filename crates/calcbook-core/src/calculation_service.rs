//! Lifecycle management for calculation records.

use std::collections::BTreeMap;

use calcbook_domain::{CalculationRecord, Operation, OwnerId, RecordId};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{arithmetic::compute, storage::RecordStore, time::SystemClock, Clock, CoreError};

/// Aggregate view over one owner's calculations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnerSummary {
    pub total: usize,
    pub per_operation: BTreeMap<Operation, usize>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Provides validated browse/read/edit/add/delete operations over a [`RecordStore`].
///
/// Every mutation routes through [`compute`], so a stored record's `result`
/// always equals `operation(operand_a, operand_b)`. Records owned by someone
/// else are reported as [`CoreError::NotFound`].
pub struct CalculationService<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: RecordStore> CalculationService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: RecordStore, C: Clock> CalculationService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Computes and persists a new calculation for `owner_id`.
    pub fn add(
        &self,
        owner_id: OwnerId,
        operation: Operation,
        operand_a: f64,
        operand_b: f64,
    ) -> Result<CalculationRecord, CoreError> {
        let result = compute(operation, operand_a, operand_b)?;
        let record = CalculationRecord::new(
            owner_id,
            operation,
            operand_a,
            operand_b,
            result,
            self.clock.now(),
        );
        let id = self.store.insert(record.clone())?;
        debug!(owner = %owner_id, record = %id, %operation, result, "calculation added");
        Ok(record)
    }

    /// Like [`add`](Self::add), parsing the operation from its textual name first.
    pub fn add_named(
        &self,
        owner_id: OwnerId,
        operation: &str,
        operand_a: f64,
        operand_b: f64,
    ) -> Result<CalculationRecord, CoreError> {
        let operation: Operation = operation.parse()?;
        self.add(owner_id, operation, operand_a, operand_b)
    }

    /// Replaces the operands of an owned record and recomputes its result
    /// with the record's existing operation.
    pub fn edit(
        &self,
        owner_id: OwnerId,
        record_id: RecordId,
        operand_a: f64,
        operand_b: f64,
    ) -> Result<CalculationRecord, CoreError> {
        let mut record = self.owned(owner_id, record_id)?;
        let result = compute(record.operation, operand_a, operand_b)?;
        record.replace_operands(operand_a, operand_b, result, self.clock.now());
        self.store.update(&record)?;
        debug!(owner = %owner_id, record = %record_id, result, "calculation edited");
        Ok(record)
    }

    pub fn read(
        &self,
        owner_id: OwnerId,
        record_id: RecordId,
    ) -> Result<CalculationRecord, CoreError> {
        self.owned(owner_id, record_id)
    }

    /// Returns the owner's records, newest first.
    pub fn browse(&self, owner_id: OwnerId) -> Result<Vec<CalculationRecord>, CoreError> {
        let mut records = self.store.list_by_owner(owner_id)?;
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        debug!(owner = %owner_id, count = records.len(), "calculations browsed");
        Ok(records)
    }

    /// Permanently removes an owned record. Deleting twice fails the second time.
    pub fn delete(&self, owner_id: OwnerId, record_id: RecordId) -> Result<(), CoreError> {
        self.owned(owner_id, record_id)?;
        if !self.store.delete(record_id)? {
            return Err(CoreError::NotFound(record_id));
        }
        debug!(owner = %owner_id, record = %record_id, "calculation deleted");
        Ok(())
    }

    pub fn summary(&self, owner_id: OwnerId) -> Result<OwnerSummary, CoreError> {
        let records = self.browse(owner_id)?;
        let mut summary = OwnerSummary {
            total: records.len(),
            ..OwnerSummary::default()
        };
        for record in &records {
            *summary.per_operation.entry(record.operation).or_default() += 1;
            summary.last_updated = summary.last_updated.max(Some(record.updated_at));
        }
        Ok(summary)
    }

    fn owned(
        &self,
        owner_id: OwnerId,
        record_id: RecordId,
    ) -> Result<CalculationRecord, CoreError> {
        match self.store.get(record_id)? {
            Some(record) if record.is_owned_by(owner_id) => Ok(record),
            Some(_) => {
                warn!(
                    owner = %owner_id,
                    record = %record_id,
                    "access to foreign calculation denied"
                );
                Err(CoreError::NotFound(record_id))
            }
            None => Err(CoreError::NotFound(record_id)),
        }
    }
}
