//! Selection request validation and the validated configuration.
//!
//! A `SelectionRequest` carries the raw constructor parameters; `validate`
//! turns it into an immutable `SelectionConfig` or fails with a typed error.
//! Soft-invalid thresholds are repaired, not rejected: the repairs are
//! recorded as diagnostics on the returned configuration so validation stays
//! a pure function.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::data_handling::Dataset;
use crate::error::SelectionError;

/// Default p-value threshold used when a symbolic criterion is supplied.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Selection strategy.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Forward,
    Backward,
    Stepwise,
}

impl FromStr for Method {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(Method::Forward),
            "backward" => Ok(Method::Backward),
            "stepwise" => Ok(Method::Stepwise),
            _ => Err(SelectionError::InvalidMethod(format!(
                "method must be forward, backward or stepwise, got '{}'",
                s
            ))),
        }
    }
}

/// Kind of regression fitted for each candidate evaluation.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegressionKind {
    Linear,
    Logistic,
}

impl FromStr for RegressionKind {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(RegressionKind::Linear),
            "logistic" => Ok(RegressionKind::Logistic),
            _ => Err(SelectionError::InvalidRegressionKind(format!(
                "reg must be linear or logistic, got '{}'",
                s
            ))),
        }
    }
}

/// Symbolic information criterion. Accepted syntactically but not yet used
/// for selection; see `Threshold`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Aic,
    Bic,
}

/// An entry or exit threshold: either a p-value in `[0, 1]` or a symbolic
/// criterion. When either threshold of a request is symbolic, validation
/// downgrades both to `DEFAULT_THRESHOLD` with a diagnostic.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Probability(f64),
    Criterion(Criterion),
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::Probability(DEFAULT_THRESHOLD)
    }
}

impl From<f64> for Threshold {
    fn from(p: f64) -> Self {
        Threshold::Probability(p)
    }
}

impl FromStr for Threshold {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aic" => Ok(Threshold::Criterion(Criterion::Aic)),
            "bic" => Ok(Threshold::Criterion(Criterion::Bic)),
            _ => s
                .parse::<f64>()
                .map(Threshold::Probability)
                .map_err(|_| {
                    SelectionError::InvalidThreshold(format!(
                        "threshold must be AIC, BIC or a number between 0 and 1, got '{}'",
                        s
                    ))
                }),
        }
    }
}

/// Raw construction parameters for a selection run.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SelectionRequest {
    /// Response column name.
    pub yname: String,
    /// Predictor column names. `None` means every column except the response.
    pub xnames: Option<Vec<String>>,
    pub method: Method,
    pub regression: RegressionKind,
    /// Entry threshold (crit_in): maximum p-value at which a predictor is added.
    pub crit_in: Threshold,
    /// Exit threshold (crit_out): minimum p-value at which a predictor is removed.
    pub crit_out: Threshold,
    /// Predictors forced into the model, never candidates for removal.
    pub x_force: Vec<String>,
    /// Report each add/remove decision at info level.
    pub verbose: bool,
    /// Run on a private copy of the dataset (default) instead of borrowing it.
    pub copy_data: bool,
}

impl SelectionRequest {
    pub fn new(yname: impl Into<String>, method: Method, regression: RegressionKind) -> Self {
        SelectionRequest {
            yname: yname.into(),
            xnames: None,
            method,
            regression,
            crit_in: Threshold::default(),
            crit_out: Threshold::default(),
            x_force: Vec::new(),
            verbose: false,
            copy_data: true,
        }
    }

    /// Validate the request against a dataset.
    ///
    /// Hard violations fail with the matching `SelectionError` before any
    /// fitting takes place. Soft-invalid thresholds (symbolic criteria,
    /// exit below entry) are repaired and the repair is recorded as a
    /// diagnostic on the returned configuration.
    pub fn validate(self, data: &Dataset) -> Result<SelectionConfig, SelectionError> {
        if data.nrows() < 2 {
            return Err(SelectionError::InvalidDataset(format!(
                "dataset has {} observations, at least 2 are required",
                data.nrows()
            )));
        }
        if !data.has_column(&self.yname) {
            return Err(SelectionError::InvalidResponseName(format!(
                "response column '{}' is not in the dataset",
                self.yname
            )));
        }
        if self.regression == RegressionKind::Logistic {
            let binary = data
                .column(&self.yname)
                .map_or(false, |y| y.iter().all(|&v| v == 0.0 || v == 1.0));
            if !binary {
                return Err(SelectionError::InvalidDataset(format!(
                    "logistic regression requires a 0/1 response, column '{}' has other values",
                    self.yname
                )));
            }
        }

        let xnames = match self.xnames {
            Some(names) => {
                for name in &names {
                    if !data.has_column(name) {
                        return Err(SelectionError::InvalidPredictorSet(format!(
                            "predictor '{}' is not a column of the dataset",
                            name
                        )));
                    }
                }
                names
            }
            // Default: every column of the dataset except the response,
            // in the dataset's natural column order.
            None => data
                .names()
                .iter()
                .filter(|n| **n != self.yname)
                .cloned()
                .collect(),
        };

        for name in &self.x_force {
            if !data.has_column(name) {
                return Err(SelectionError::InvalidPredictorSet(format!(
                    "forced variable '{}' is not a column of the dataset",
                    name
                )));
            }
            if !xnames.contains(name) {
                return Err(SelectionError::InvalidPredictorSet(format!(
                    "forced variable '{}' is not in the predictor set",
                    name
                )));
            }
        }

        let mut diagnostics = Vec::new();

        let symbolic = matches!(self.crit_in, Threshold::Criterion(_))
            || matches!(self.crit_out, Threshold::Criterion(_));
        let crit_in = check_probability(self.crit_in, "crit_in")?;
        let crit_out = check_probability(self.crit_out, "crit_out")?;
        let (crit_in, mut crit_out) = if symbolic {
            diagnostics.push(format!(
                "AIC/BIC criteria are not implemented; using p-value thresholds {} for both crit_in and crit_out",
                DEFAULT_THRESHOLD
            ));
            (DEFAULT_THRESHOLD, DEFAULT_THRESHOLD)
        } else {
            (crit_in, crit_out)
        };

        // Invariant: crit_out >= crit_in. Repaired by raising the exit
        // threshold, never by lowering the entry threshold.
        if crit_out < crit_in {
            diagnostics.push(format!(
                "crit_out {} is below crit_in {}; raising crit_out to {}",
                crit_out, crit_in, crit_in
            ));
            crit_out = crit_in;
        }

        Ok(SelectionConfig {
            yname: self.yname,
            xnames,
            method: self.method,
            regression: self.regression,
            crit_in,
            crit_out,
            x_force: self.x_force,
            verbose: self.verbose,
            copy_data: self.copy_data,
            diagnostics,
        })
    }
}

/// A validated, immutable selection configuration.
///
/// `diagnostics` holds the human-readable repair messages produced during
/// validation; the selector logs them once at construction.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    pub yname: String,
    pub xnames: Vec<String>,
    pub method: Method,
    pub regression: RegressionKind,
    pub crit_in: f64,
    pub crit_out: f64,
    pub x_force: Vec<String>,
    pub verbose: bool,
    pub copy_data: bool,
    pub diagnostics: Vec<String>,
}

/// Range-check a numeric threshold. Symbolic criteria pass through with the
/// default value; the symbolic downgrade itself is handled by the caller.
fn check_probability(t: Threshold, which: &str) -> Result<f64, SelectionError> {
    match t {
        Threshold::Probability(p) => {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                Err(SelectionError::InvalidThreshold(format!(
                    "{} must be a number between 0 and 1, got {}",
                    which, p
                )))
            } else {
                Ok(p)
            }
        }
        Threshold::Criterion(_) => Ok(DEFAULT_THRESHOLD),
    }
}
