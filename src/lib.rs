//! stepwise-select: p-value driven feature selection for regression models.
//!
//! This crate automates the add/remove cycle of stepwise variable selection
//! for linear (OLS) and logistic regression: validate a selection request,
//! then run a forward, backward or bidirectional control loop that refits
//! the model per candidate and keeps the predictors whose coefficients stay
//! significant.
//!
//! The design favors small, testable modules: a pure configuration
//! validator, a `RegressionEngine` trait with OLS and logit implementations,
//! and a `Selector` that owns the included/excluded partition and runs one
//! strategy to its fixed point.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod math;
pub mod regression;
pub mod selection;
