//! Input/output helpers.
//!
//! - plain-text ingest + validation (`ingest`)
//! - JSON result export (`results`)

pub mod ingest;
pub mod results;

pub use ingest::*;
pub use results::*;
