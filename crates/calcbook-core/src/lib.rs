//! calcbook-core
//!
//! Business logic for calculation records.
//! Depends on calcbook-domain. No CLI, no terminal I/O, no file persistence.

pub mod api;
pub mod arithmetic;
pub mod calculation_service;
pub mod error;
pub mod identity;
pub mod memory_store;
pub mod storage;
pub mod time;


pub use api::CalculationApi;
pub use calculation_service::{CalculationService, OwnerSummary};
pub use error::{AuthError, CoreError};
pub use identity::{IdentityProvider, TokenIdentityProvider};
pub use memory_store::InMemoryRecordStore;
pub use storage::RecordStore;
pub use time::{Clock, SystemClock};
