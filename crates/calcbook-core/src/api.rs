//! Credential-scoped entry point over [`CalculationService`].

use std::sync::Arc;

use calcbook_domain::{CalculationRecord, Credential, Operation, OwnerId, RecordId};

use crate::{
    calculation_service::OwnerSummary, storage::RecordStore, time::SystemClock,
    CalculationService, Clock, CoreError, IdentityProvider,
};

/// Resolves the caller's credential on every call, then delegates to the
/// service. Authentication failures surface as [`CoreError::Authentication`].
pub struct CalculationApi<S, C = SystemClock> {
    service: CalculationService<S, C>,
    identity: Arc<dyn IdentityProvider>,
}

impl<S: RecordStore, C: Clock> CalculationApi<S, C> {
    pub fn new(service: CalculationService<S, C>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { service, identity }
    }

    pub fn service(&self) -> &CalculationService<S, C> {
        &self.service
    }

    pub fn authenticate(&self, credential: &Credential) -> Result<OwnerId, CoreError> {
        Ok(self.identity.resolve(credential)?)
    }

    pub fn add(
        &self,
        credential: &Credential,
        operation: Operation,
        operand_a: f64,
        operand_b: f64,
    ) -> Result<CalculationRecord, CoreError> {
        let owner = self.authenticate(credential)?;
        self.service.add(owner, operation, operand_a, operand_b)
    }

    pub fn add_named(
        &self,
        credential: &Credential,
        operation: &str,
        operand_a: f64,
        operand_b: f64,
    ) -> Result<CalculationRecord, CoreError> {
        let owner = self.authenticate(credential)?;
        self.service.add_named(owner, operation, operand_a, operand_b)
    }

    pub fn edit(
        &self,
        credential: &Credential,
        record_id: RecordId,
        operand_a: f64,
        operand_b: f64,
    ) -> Result<CalculationRecord, CoreError> {
        let owner = self.authenticate(credential)?;
        self.service.edit(owner, record_id, operand_a, operand_b)
    }

    pub fn read(
        &self,
        credential: &Credential,
        record_id: RecordId,
    ) -> Result<CalculationRecord, CoreError> {
        let owner = self.authenticate(credential)?;
        self.service.read(owner, record_id)
    }

    pub fn browse(&self, credential: &Credential) -> Result<Vec<CalculationRecord>, CoreError> {
        let owner = self.authenticate(credential)?;
        self.service.browse(owner)
    }

    pub fn delete(&self, credential: &Credential, record_id: RecordId) -> Result<(), CoreError> {
        let owner = self.authenticate(credential)?;
        self.service.delete(owner, record_id)
    }

    pub fn summary(&self, credential: &Credential) -> Result<OwnerSummary, CoreError> {
        let owner = self.authenticate(credential)?;
        self.service.summary(owner)
    }
}
