//! Plain-text ingest.
//!
//! This module turns a whitespace/line-separated stream of numeric tokens into
//! a clean observation set that is safe to fit.
//!
//! Design goals:
//! - **Strict parsing** with clear errors carrying line numbers (exit code 2)
//! - **Empty input is an error**, never silent output (exit code 3)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no fitting logic here

use std::fs;
use std::path::Path;

use crate::domain::DatasetStats;
use crate::error::AppError;

/// Ingest output: the observations plus summary stats.
///
/// The observation set is immutable once loaded; order is irrelevant to the
/// fit and duplicates are permitted.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub values: Vec<f64>,
    pub stats: DatasetStats,
}

/// Load whitespace/line-separated numeric observations from a text file.
pub fn load_observations(path: &Path) -> Result<IngestedData, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::input(format!("Failed to read '{}': {e}", path.display())))?;

    let mut values = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| {
                AppError::input(format!(
                    "Non-numeric token '{token}' on line {lineno} of '{}'.",
                    path.display()
                ))
            })?;
            if !value.is_finite() {
                return Err(AppError::input(format!(
                    "Non-finite value '{token}' on line {lineno} of '{}'.",
                    path.display()
                )));
            }
            values.push(value);
        }
    }

    let stats = compute_stats(&values).ok_or_else(|| {
        AppError::data(format!("No observations found in '{}'.", path.display()))
    })?;

    Ok(IngestedData { values, stats })
}

/// Summary stats over a loaded observation set. `None` when empty.
pub fn compute_stats(values: &[f64]) -> Option<DatasetStats> {
    if values.is_empty() {
        return None;
    }
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    for &v in values {
        x_min = x_min.min(v);
        x_max = x_max.max(v);
    }
    Some(DatasetStats {
        n_points: values.len(),
        x_min,
        x_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;

    struct TempFile(PathBuf);

    impl TempFile {
        fn with_content(name: &str, content: &str) -> Self {
            let path = std::env::temp_dir().join(format!("tailfit-ingest-{}-{name}", std::process::id()));
            let mut file = File::create(&path).unwrap();
            file.write_all(content.as_bytes()).unwrap();
            Self(path)
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn parses_mixed_whitespace_layout() {
        let tmp = TempFile::with_content("mixed.txt", "1.5 2\n3.25\t4\n\n5e2\n");
        let data = load_observations(&tmp.0).unwrap();
        assert_eq!(data.values, vec![1.5, 2.0, 3.25, 4.0, 500.0]);
        assert_eq!(data.stats.n_points, 5);
        assert_eq!(data.stats.x_min, 1.5);
        assert_eq!(data.stats.x_max, 500.0);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let path = std::env::temp_dir().join("tailfit-ingest-does-not-exist.txt");
        let err = load_observations(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_token_reports_its_line() {
        let tmp = TempFile::with_content("bad.txt", "1.0 2.0\n3.0 oops\n");
        let err = load_observations(&tmp.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let msg = err.to_string();
        assert!(msg.contains("oops") && msg.contains("line 2"), "{msg}");
    }

    #[test]
    fn non_finite_token_is_rejected() {
        let tmp = TempFile::with_content("nan.txt", "1.0\nNaN\n");
        let err = load_observations(&tmp.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_file_is_a_data_error() {
        let tmp = TempFile::with_content("empty.txt", "");
        let err = load_observations(&tmp.0).unwrap_err();
        assert_eq!(err.exit_code(), 3);

        let blank = TempFile::with_content("blank.txt", "\n  \n\t\n");
        let err = load_observations(&blank.0).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
