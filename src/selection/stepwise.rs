//! P-value driven stepwise feature selection.
//!
//! Three strategies over one shared state: `forward` only adds predictors,
//! `backward` only removes them, and `stepwise` performs one forward and one
//! backward sub-step per iteration. Each strategy runs to a fixed point: a
//! pass with no inclusion and no removal terminates the loop.

use std::borrow::Cow;

use rayon::prelude::*;

use crate::config::{Method, SelectionConfig, SelectionRequest};
use crate::data_handling::Dataset;
use crate::error::SelectionError;
use crate::regression::engine::{FitSummary, RegressionEngine};
use crate::regression::factory::build_engine;

/// Runs one configured selection strategy over a dataset.
///
/// The dataset is either an exclusive private copy (default) or a borrowed
/// reference, decided once at construction via the request's copy flag.
pub struct Selector<'a> {
    data: Cow<'a, Dataset>,
    config: SelectionConfig,
    engine: Box<dyn RegressionEngine>,
    selected: Vec<String>,
}

impl<'a> Selector<'a> {
    /// Validate the request against the dataset and build a selector.
    ///
    /// Fails fast: every configuration error is detected here, before any
    /// model is fitted. Validation diagnostics (threshold repairs) are
    /// logged once at warn level.
    pub fn new(data: &'a Dataset, request: SelectionRequest) -> Result<Self, SelectionError> {
        let config = request.validate(data)?;
        let engine = build_engine(config.regression);
        Ok(Self::from_config(data, config, engine))
    }

    /// Like `new`, but with a caller-supplied engine instead of the factory
    /// default for the configured regression kind.
    pub fn with_engine(
        data: &'a Dataset,
        request: SelectionRequest,
        engine: Box<dyn RegressionEngine>,
    ) -> Result<Self, SelectionError> {
        let config = request.validate(data)?;
        Ok(Self::from_config(data, config, engine))
    }

    fn from_config(
        data: &'a Dataset,
        config: SelectionConfig,
        engine: Box<dyn RegressionEngine>,
    ) -> Self {
        for diag in &config.diagnostics {
            log::warn!("{}", diag);
        }

        let data = if config.copy_data {
            Cow::Owned(data.clone())
        } else {
            Cow::Borrowed(data)
        };

        Selector {
            data,
            config,
            engine,
            selected: Vec::new(),
        }
    }

    /// Execute the configured strategy and return the ordered selection.
    ///
    /// The result is also retained and available through `selected()` after
    /// the call. A `FitDidNotConverge` from the engine aborts the run; an
    /// empty selection is a normal outcome, not an error.
    pub fn run(&mut self) -> Result<Vec<String>, SelectionError> {
        self.data.log_summary();
        let included = match self.config.method {
            Method::Forward => self.forward()?,
            Method::Backward => self.backward()?,
            Method::Stepwise => self.stepwise()?,
        };
        self.selected = included.clone();
        Ok(included)
    }

    /// The selection produced by the last `run()`, in selection order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Forward selection: start from the forced variables, add the best
    /// candidate per pass while its p-value stays below the entry threshold.
    fn forward(&self) -> Result<Vec<String>, SelectionError> {
        let mut included = self.config.x_force.clone();
        let mut excluded = self.remaining(&included);
        let limit = self.max_passes();
        for _ in 0..limit {
            if !self.forward_step(&mut included, &mut excluded)? {
                return Ok(included);
            }
        }
        self.warn_no_convergence(limit);
        Ok(included)
    }

    /// Backward elimination: start from the full predictor set, remove the
    /// worst non-forced predictor per pass while its p-value exceeds the
    /// exit threshold.
    fn backward(&self) -> Result<Vec<String>, SelectionError> {
        let mut included = self.config.xnames.clone();
        let limit = self.max_passes();
        for _ in 0..limit {
            if !self.backward_step(&mut included)? {
                return Ok(included);
            }
        }
        self.warn_no_convergence(limit);
        Ok(included)
    }

    /// Bidirectional selection: one forward sub-step then one backward
    /// sub-step per iteration (not each to its own fixed point), stopping
    /// when neither changes the state. The just-added variable gets no
    /// protection against immediate re-removal; the pass limit bounds the
    /// resulting oscillation risk.
    fn stepwise(&self) -> Result<Vec<String>, SelectionError> {
        let mut included = self.config.x_force.clone();
        let limit = self.max_passes();
        for _ in 0..limit {
            let mut excluded = self.remaining(&included);
            let added = self.forward_step(&mut included, &mut excluded)?;
            let removed = self.backward_step(&mut included)?;
            if !added && !removed {
                return Ok(included);
            }
        }
        self.warn_no_convergence(limit);
        Ok(included)
    }

    /// One forward pass: fit every excluded candidate on top of the current
    /// model and admit the minimum p-value if it beats the entry threshold.
    /// Returns whether the state changed.
    ///
    /// The candidate fits are independent and read-only, so they are mapped
    /// in parallel; the single admission decision is committed serially.
    fn forward_step(
        &self,
        included: &mut Vec<String>,
        excluded: &mut Vec<String>,
    ) -> Result<bool, SelectionError> {
        if excluded.is_empty() {
            return Ok(false);
        }

        let pvalues: Vec<f64> = excluded
            .par_iter()
            .map(|candidate| self.candidate_pvalue(included, candidate))
            .collect::<Result<_, SelectionError>>()?;

        // Strict comparison keeps the first-encountered candidate on ties.
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in pvalues.iter().enumerate() {
            if best.map_or(true, |(_, bp)| p < bp) {
                best = Some((i, p));
            }
        }

        if let Some((idx, p)) = best {
            if p < self.config.crit_in {
                let name = excluded.remove(idx);
                if self.config.verbose {
                    log::info!("Add  {:<30} with p-value {:.6}", name, p);
                }
                included.push(name);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// One backward pass: fit the current model once and drop the maximum
    /// p-value among the non-forced included predictors if it exceeds the
    /// exit threshold. Returns whether the state changed.
    fn backward_step(&self, included: &mut Vec<String>) -> Result<bool, SelectionError> {
        if included.is_empty() {
            return Ok(false);
        }

        let summary = self.fit_pvalues(included)?;

        // Forced variables are never candidates for removal, whatever their
        // own p-value.
        let mut worst: Option<(usize, f64)> = None;
        for (i, name) in included.iter().enumerate() {
            if self.config.x_force.iter().any(|f| f == name) {
                continue;
            }
            let p = self.lookup_pvalue(&summary, name)?;
            if worst.map_or(true, |(_, wp)| p > wp) {
                worst = Some((i, p));
            }
        }

        if let Some((idx, p)) = worst {
            if p > self.config.crit_out {
                let name = included.remove(idx);
                if self.config.verbose {
                    log::info!("Remove {:<30} with p-value {:.6}", name, p);
                }
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// P-value of `candidate` when fitted on top of the current model.
    fn candidate_pvalue(
        &self,
        included: &[String],
        candidate: &str,
    ) -> Result<f64, SelectionError> {
        let mut columns = included.to_vec();
        columns.push(candidate.to_string());
        let summary = self.fit_pvalues(&columns)?;
        self.lookup_pvalue(&summary, candidate)
    }

    /// Fit the engine on (response, predictors) and return per-predictor
    /// p-values. The intercept is fitted in every model by the engine.
    fn fit_pvalues(&self, predictors: &[String]) -> Result<FitSummary, SelectionError> {
        let y = self.data.column(&self.config.yname).ok_or_else(|| {
            SelectionError::InvalidResponseName(format!(
                "response column '{}' is not in the dataset",
                self.config.yname
            ))
        })?;
        let x = self.data.predictor_matrix(predictors)?;
        self.engine.fit(y, &x, predictors)
    }

    fn lookup_pvalue(&self, summary: &FitSummary, name: &str) -> Result<f64, SelectionError> {
        summary.pvalue(name).ok_or_else(|| {
            SelectionError::FitDidNotConverge(format!(
                "{} engine reported no p-value for '{}'",
                self.engine.name(),
                name
            ))
        })
    }

    /// Predictors not currently included, in dataset column order.
    fn remaining(&self, included: &[String]) -> Vec<String> {
        self.config
            .xnames
            .iter()
            .filter(|n| !included.contains(n))
            .cloned()
            .collect()
    }

    /// Pass bound against pathological oscillation. A clean run converges
    /// well under this; hitting it returns the current selection with a
    /// warning instead of looping forever.
    fn max_passes(&self) -> usize {
        2 * self.config.xnames.len() + 16
    }

    fn warn_no_convergence(&self, limit: usize) {
        log::warn!(
            "selection did not converge after {} passes; returning the current model",
            limit
        );
    }
}
