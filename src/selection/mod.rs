//! Feature selection strategies.
//!
//! This module contains the p-value driven stepwise selection routines
//! (forward, backward and bidirectional) over a fitted regression engine.
pub mod stepwise;
