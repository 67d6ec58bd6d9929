//! Data structures for the tabular source a selection run operates on.
//!
//! A `Dataset` is a set of named numeric columns of equal length. The order
//! in which columns are added is the dataset's natural column order, which is
//! also the candidate evaluation order (and therefore the tie-break order)
//! used by the selector.

use ndarray::{Array1, Array2};

use crate::error::SelectionError;

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Array1<f64>>,
}

impl Dataset {
    /// Build a dataset from `(name, values)` pairs.
    ///
    /// Fails with `InvalidDataset` when the column lengths differ, a name is
    /// duplicated, or no columns are given.
    pub fn from_columns(
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, SelectionError> {
        if columns.is_empty() {
            return Err(SelectionError::InvalidDataset(
                "dataset has no columns".to_string(),
            ));
        }
        let nrows = columns[0].1.len();
        let mut ds = Dataset::default();
        for (name, values) in columns {
            if values.len() != nrows {
                return Err(SelectionError::InvalidDataset(format!(
                    "column '{}' has {} rows, expected {}",
                    name,
                    values.len(),
                    nrows
                )));
            }
            if ds.has_column(&name) {
                return Err(SelectionError::InvalidDataset(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
            ds.names.push(name);
            ds.columns.push(Array1::from_vec(values));
        }
        Ok(ds)
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    pub fn ncols(&self) -> usize {
        self.names.len()
    }

    /// Column names in natural order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Array1<f64>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    /// Assemble the `n_rows x names.len()` matrix of the named columns, in
    /// the order given. Used by the selector to build candidate design
    /// matrices; the intercept column is added by the engine, not here.
    pub fn predictor_matrix(&self, names: &[String]) -> Result<Array2<f64>, SelectionError> {
        let nrows = self.nrows();
        let mut x = Array2::zeros((nrows, names.len()));
        for (j, name) in names.iter().enumerate() {
            let col = self.column(name).ok_or_else(|| {
                SelectionError::InvalidPredictorSet(format!(
                    "predictor '{}' is not a column of the dataset",
                    name
                ))
            })?;
            x.column_mut(j).assign(col);
        }
        Ok(x)
    }

    pub fn log_summary(&self) {
        log::debug!(
            "dataset: {} observations, {} columns",
            self.nrows(),
            self.ncols()
        );
    }
}
