use ndarray::{Array1, Array2, Axis};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::SelectionError;
use crate::math::{add_intercept, invert, linalg};
use crate::regression::engine::{two_sided_pvalue, FitSummary, RegressionEngine};

/// Newton-Raphson iteration cap, matching the statsmodels Logit default.
const MAX_ITER: usize = 35;
/// Convergence tolerance on the largest coefficient step.
const TOL: f64 = 1e-8;
/// Fitted probabilities are clamped away from 0 and 1 to keep the working
/// weights finite.
const MU_EPS: f64 = 1e-10;

/// Logistic maximum-likelihood engine.
///
/// Fits by iteratively reweighted least squares and reports Wald z-test
/// p-values. Complete separation shows up as either a singular information
/// matrix or divergence past the iteration cap; both abort the run.
#[derive(Debug, Default, Clone)]
pub struct LogitEngine;

impl LogitEngine {
    pub fn new() -> Self {
        LogitEngine
    }
}

impl RegressionEngine for LogitEngine {
    fn fit(
        &self,
        y: &Array1<f64>,
        x: &Array2<f64>,
        names: &[String],
    ) -> Result<FitSummary, SelectionError> {
        if y.iter().any(|&v| v != 0.0 && v != 1.0) {
            return Err(SelectionError::InvalidDataset(
                "logistic regression requires a 0/1 response".to_string(),
            ));
        }

        let xd = add_intercept(x);
        let k = xd.ncols();
        let mut beta: Array1<f64> = Array1::zeros(k);
        let mut converged = false;

        for iter in 0..MAX_ITER {
            let eta = xd.dot(&beta);
            let mu = eta.mapv(|e| sigmoid(e).clamp(MU_EPS, 1.0 - MU_EPS));
            let w = mu.mapv(|m| m * (1.0 - m));

            let xw = &xd * &w.view().insert_axis(Axis(1));
            let info = xd.t().dot(&xw);
            let grad = xd.t().dot(&(y - &mu));

            let step = linalg::solve(&info, &grad).ok_or_else(|| {
                SelectionError::FitDidNotConverge(
                    "singular information matrix".to_string(),
                )
            })?;

            beta += &step;
            let max_step = step.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
            if !max_step.is_finite() {
                return Err(SelectionError::FitDidNotConverge(
                    "diverging Newton step".to_string(),
                ));
            }
            if max_step < TOL {
                log::debug!("logit converged after {} iterations", iter + 1);
                converged = true;
                break;
            }
        }

        if !converged {
            return Err(SelectionError::FitDidNotConverge(format!(
                "no convergence after {} iterations (possible separation)",
                MAX_ITER
            )));
        }

        // Covariance from the observed information at the solution.
        let eta = xd.dot(&beta);
        let mu = eta.mapv(|e| sigmoid(e).clamp(MU_EPS, 1.0 - MU_EPS));
        let w = mu.mapv(|m| m * (1.0 - m));
        let xw = &xd * &w.view().insert_axis(Axis(1));
        let cov = invert(&xd.t().dot(&xw)).ok_or_else(|| {
            SelectionError::FitDidNotConverge("singular information matrix".to_string())
        })?;

        let normal = Normal::new(0.0, 1.0).map_err(|e| {
            SelectionError::FitDidNotConverge(format!("normal distribution: {}", e))
        })?;

        let mut pvalues = Vec::with_capacity(names.len());
        for j in 1..k {
            let z = beta[j] / cov[(j, j)].max(0.0).sqrt();
            pvalues.push(two_sided_pvalue(z, |s| 1.0 - normal.cdf(s)));
        }

        Ok(FitSummary::new(names.to_vec(), pvalues))
    }

    fn name(&self) -> &str {
        "logit"
    }
}

fn sigmoid(e: f64) -> f64 {
    1.0 / (1.0 + (-e).exp())
}
