//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - per-record results CSV (`export`)
//! - run summary JSON read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
