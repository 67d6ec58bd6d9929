use ndarray::{Array1, Array2};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::SelectionError;
use crate::math::{add_intercept, invert};
use crate::regression::engine::{two_sided_pvalue, FitSummary, RegressionEngine};

/// Ordinary least squares engine.
///
/// Coefficients come from the normal equations; each predictor's p-value is
/// a two-sided t-test of its coefficient against zero with `n - k - 1`
/// residual degrees of freedom.
#[derive(Debug, Default, Clone)]
pub struct OlsEngine;

impl OlsEngine {
    pub fn new() -> Self {
        OlsEngine
    }
}

impl RegressionEngine for OlsEngine {
    fn fit(
        &self,
        y: &Array1<f64>,
        x: &Array2<f64>,
        names: &[String],
    ) -> Result<FitSummary, SelectionError> {
        let n = x.nrows();
        let xd = add_intercept(x);
        let k = xd.ncols();

        let df = n as f64 - k as f64;
        if df <= 0.0 {
            return Err(SelectionError::FitDidNotConverge(format!(
                "no residual degrees of freedom ({} observations, {} coefficients)",
                n, k
            )));
        }

        let xtx = xd.t().dot(&xd);
        let xtx_inv = invert(&xtx).ok_or_else(|| {
            SelectionError::FitDidNotConverge("singular design matrix".to_string())
        })?;
        let beta: Array1<f64> = xtx_inv.dot(&xd.t().dot(y));

        let residuals = y - &xd.dot(&beta);
        let sigma2 = residuals.dot(&residuals) / df;

        let t_dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
            SelectionError::FitDidNotConverge(format!("t distribution: {}", e))
        })?;

        // Coefficient 0 is the intercept; predictors start at column 1.
        let mut pvalues = Vec::with_capacity(names.len());
        for j in 1..k {
            let var = sigma2 * xtx_inv[(j, j)];
            let t = beta[j] / var.max(0.0).sqrt();
            pvalues.push(two_sided_pvalue(t, |s| 1.0 - t_dist.cdf(s)));
        }

        Ok(FitSummary::new(names.to_vec(), pvalues))
    }

    fn name(&self) -> &str {
        "ols"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn strong_predictor_gets_tiny_pvalue() {
        let x = array![
            [0.0],
            [1.0],
            [2.0],
            [3.0],
            [4.0],
            [5.0],
            [6.0],
            [7.0]
        ];
        // y = 2x with a small fixed perturbation.
        let y = array![0.01, 2.0, 3.99, 6.02, 8.0, 9.98, 12.01, 14.0];
        let summary = OlsEngine::new()
            .fit(&y, &x, &["x".to_string()])
            .expect("well conditioned fit");
        let p = summary.pvalue("x").unwrap();
        assert!(p < 1e-6, "expected near-zero p-value, got {}", p);
    }

    #[test]
    fn duplicated_column_is_singular() {
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];
        let err = OlsEngine::new()
            .fit(&y, &x, &["a".to_string(), "b".to_string()])
            .unwrap_err();
        assert!(matches!(err, SelectionError::FitDidNotConverge(_)));
    }

    #[test]
    fn too_few_observations_fail() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0];
        // 2 observations, 2 coefficients (intercept + slope): df = 0.
        let err = OlsEngine::new()
            .fit(&y, &x, &["x".to_string()])
            .unwrap_err();
        assert!(matches!(err, SelectionError::FitDidNotConverge(_)));
    }
}
