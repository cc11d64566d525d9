//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configuration (`FitConfig`, `SampleConfig`)
//! - dataset summaries (`DatasetStats`)
//! - fit outputs (`PowerLawFit`, `LognormalFit`, `Comparison`, `ResultFile`)

pub mod types;

pub use types::*;
