use std::error::Error;
use std::fmt;

/// Custom error type for selection-run failures.
///
/// Configuration errors are raised eagerly during validation, before any
/// model is fitted. `FitDidNotConverge` is the only error that can occur
/// mid-run and always aborts the run.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    InvalidRegressionKind(String),
    InvalidDataset(String),
    InvalidResponseName(String),
    InvalidPredictorSet(String),
    InvalidMethod(String),
    InvalidThreshold(String),
    FitDidNotConverge(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectionError::InvalidRegressionKind(msg) => {
                write!(f, "Invalid regression kind: {}", msg)
            }
            SelectionError::InvalidDataset(msg) => write!(f, "Invalid dataset: {}", msg),
            SelectionError::InvalidResponseName(msg) => {
                write!(f, "Invalid response name: {}", msg)
            }
            SelectionError::InvalidPredictorSet(msg) => {
                write!(f, "Invalid predictor set: {}", msg)
            }
            SelectionError::InvalidMethod(msg) => write!(f, "Invalid method: {}", msg),
            SelectionError::InvalidThreshold(msg) => write!(f, "Invalid threshold: {}", msg),
            SelectionError::FitDidNotConverge(msg) => {
                write!(f, "Fit did not converge: {}", msg)
            }
        }
    }
}

impl Error for SelectionError {}
