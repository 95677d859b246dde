//! Input/output helpers.
//!
//! - CSV ingest of return tables (`ingest`)
//! - reported vs. unsmoothed CSV export (`export`)
//! - JSON run summaries (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
