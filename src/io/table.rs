//! CSV reader for numeric selection datasets.
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::data_handling::Dataset;

/// Read a CSV file with a header row into a `Dataset`.
///
/// The header names the columns; every body cell must parse as `f64`.
/// Column order in the file becomes the dataset's natural column order.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open CSV file: {}", path.as_ref().display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV row {}", row_idx + 2))?;
        if record.len() != headers.len() {
            return Err(anyhow!(
                "Row {} has {} fields, expected {}",
                row_idx + 2,
                record.len(),
                headers.len()
            ));
        }
        for (col_idx, field) in record.iter().enumerate() {
            let value: f64 = field.trim().parse().with_context(|| {
                format!(
                    "Non-numeric value '{}' in column '{}' at row {}",
                    field,
                    headers[col_idx],
                    row_idx + 2
                )
            })?;
            columns[col_idx].push(value);
        }
    }

    let dataset = Dataset::from_columns(
        headers.into_iter().zip(columns).collect(),
    )
    .context("CSV columns do not form a valid dataset")?;
    Ok(dataset)
}
