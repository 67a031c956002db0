use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Operation, OwnerId, RecordId};

/// A persisted arithmetic calculation owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationRecord {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub operation: Operation,
    pub operand_a: f64,
    pub operand_b: f64,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CalculationRecord {
    /// Builds a fresh record with a new identifier. `result` must already be
    /// the value of `operation(operand_a, operand_b)`.
    pub fn new(
        owner_id: OwnerId,
        operation: Operation,
        operand_a: f64,
        operand_b: f64,
        result: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            owner_id,
            operation,
            operand_a,
            operand_b,
            result,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, owner_id: OwnerId) -> bool {
        self.owner_id == owner_id
    }

    /// Replaces the operands and result, bumping `updated_at`.
    pub fn replace_operands(
        &mut self,
        operand_a: f64,
        operand_b: f64,
        result: f64,
        at: DateTime<Utc>,
    ) {
        self.operand_a = operand_a;
        self.operand_b = operand_b;
        self.result = result;
        self.touch(at);
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    /// Renders the calculation as `a <symbol> b = result`.
    pub fn expression(&self) -> String {
        format!(
            "{} {} {} = {}",
            self.operand_a,
            self.operation.symbol(),
            self.operand_b,
            self.result
        )
    }
}
