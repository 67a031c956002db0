//! calcbook-domain
//!
//! Pure domain models (operations, calculation records, identities).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod identity;
pub mod operation;
pub mod record;

pub use identity::*;
pub use operation::*;
pub use record::*;
