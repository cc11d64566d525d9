//! JSON result export.
//!
//! The export is the "portable" representation of a finished run: dataset
//! stats, the fitted power law, the lognormal comparison fit, and the Vuong
//! statistic. The schema is defined by `domain::ResultFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::ResultFile;
use crate::error::AppError;

/// Write a result JSON file.
pub fn write_results_json(path: &Path, results: &ResultFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!(
            "Failed to create result JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, results)
        .map_err(|e| AppError::input(format!("Failed to write result JSON: {e}")))?;

    Ok(())
}
