use ndarray::{Array1, Array2};

use crate::error::SelectionError;

/// Coefficient p-values from one fitted model, in design-matrix column order.
///
/// The intercept is fitted in every model but never reported here; the
/// selector only ever asks about named predictors.
#[derive(Debug, Clone)]
pub struct FitSummary {
    names: Vec<String>,
    pvalues: Vec<f64>,
}

impl FitSummary {
    pub fn new(names: Vec<String>, pvalues: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), pvalues.len());
        FitSummary { names, pvalues }
    }

    /// The p-value of the named predictor, if it was part of the fit.
    pub fn pvalue(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.pvalues[i])
    }

    /// `(name, p-value)` pairs in the engine's natural column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.pvalues.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A small trait abstraction for the regression engines driven by the
/// selector. Implementations fit (response, predictors) with an intercept
/// and report per-predictor coefficient p-values; an estimation failure
/// (singular design, separation) is a `FitDidNotConverge` error, never a
/// silent "not significant".
pub trait RegressionEngine: Send + Sync {
    /// Fit on `y` against the columns of `x`, whose names are given in
    /// column order by `names`.
    fn fit(
        &self,
        y: &Array1<f64>,
        x: &Array2<f64>,
        names: &[String],
    ) -> Result<FitSummary, SelectionError>;

    /// Human readable engine name.
    fn name(&self) -> &str {
        "regression"
    }
}

/// Two-sided p-value from a test statistic and its reference distribution's
/// upper tail, with non-finite statistics forced to a usable value: an
/// infinite statistic maps to 0.0 and NaN to 1.0.
pub fn two_sided_pvalue<F>(stat: f64, upper_tail: F) -> f64
where
    F: Fn(f64) -> f64,
{
    if stat.is_nan() {
        return 1.0;
    }
    if stat.is_infinite() {
        return 0.0;
    }
    (2.0 * upper_tail(stat.abs())).clamp(0.0, 1.0)
}
