use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::{AssayDataset, IndependentAxis, FLUORESCENCE_COLUMN};

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Column-level validation failures. Everything else (unreadable file,
/// malformed rows) propagates as `anyhow::Error` with context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    /// Neither recognized independent-variable column is present.
    #[error("CSV file must contain either 'Time_Sec' or 'Wavelength' column")]
    InvalidDataset,

    /// The dependent-variable column is missing.
    #[error("CSV file must contain a 'Fluorescence' column")]
    MissingFluorescence,
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load an assay dataset from a CSV file.
///
/// Expected layout: header row naming a `Fluorescence` column and one of the
/// recognized independent columns (`Time_Sec` or `Wavelength`). All other
/// columns are ignored.
pub fn load_csv(path: &Path) -> Result<AssayDataset> {
    let sample_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "assay".to_string());

    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let (axis, x_idx) = IndependentAxis::detect(&headers).ok_or(DatasetError::InvalidDataset)?;

    // The priority order is first-match; surface the ambiguity when a file
    // carries both recognized columns.
    for other in IndependentAxis::ALL {
        if other != axis && headers.iter().any(|h| h == other.column()) {
            log::warn!(
                "'{}': both '{}' and '{}' columns present, using '{}'",
                sample_name,
                axis.column(),
                other.column(),
                axis.column()
            );
        }
    }

    let y_idx = headers
        .iter()
        .position(|h| h == FLUORESCENCE_COLUMN)
        .ok_or(DatasetError::MissingFluorescence)?;

    let mut x = Vec::new();
    let mut y = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        x.push(parse_cell(record.get(x_idx), row_no, axis.column())?);
        y.push(parse_cell(record.get(y_idx), row_no, FLUORESCENCE_COLUMN)?);
    }

    log::debug!(
        "loaded '{}': {} rows, axis {:?}",
        sample_name,
        x.len(),
        axis
    );

    Ok(AssayDataset {
        sample_name,
        axis,
        x,
        y,
    })
}

fn parse_cell(cell: Option<&str>, row: usize, col: &str) -> Result<f64> {
    let tok = cell.unwrap_or("");
    tok.trim()
        .parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{tok}' is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_kinetics_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "sample1.csv",
            "Time_Sec,Fluorescence\n0,1.0\n1,2.0\n2,1.5\n3,3.0\n",
        );

        let ds = load_csv(&path).unwrap();
        assert_eq!(ds.sample_name, "sample1");
        assert_eq!(ds.axis, IndependentAxis::TimeSeconds);
        assert_eq!(ds.x, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(ds.y, vec![1.0, 2.0, 1.5, 3.0]);
    }

    #[test]
    fn loads_spectrum_csv_and_ignores_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "emission.csv",
            "Well,Wavelength,Fluorescence\nA1,450,0.2\nA1,460,0.9\nA1,470,0.4\nA1,480,0.1\n",
        );

        let ds = load_csv(&path).unwrap();
        assert_eq!(ds.axis, IndependentAxis::Wavelength);
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.x[0], 450.0);
        assert_eq!(ds.y[1], 0.9);
    }

    #[test]
    fn missing_independent_column_is_invalid_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "bad.csv", "Well,Fluorescence\nA1,0.2\n");

        let err = load_csv(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::InvalidDataset)
        );
    }

    #[test]
    fn missing_fluorescence_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "bad.csv", "Time_Sec,Abs\n0,0.2\n");

        let err = load_csv(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingFluorescence)
        );
    }

    #[test]
    fn malformed_number_carries_row_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "bad.csv",
            "Time_Sec,Fluorescence\n0,1.0\nnope,2.0\n",
        );

        let err = load_csv(&path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 1"), "unexpected error: {msg}");
        assert!(msg.contains("nope"), "unexpected error: {msg}");
    }
}
