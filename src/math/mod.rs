//! Small numeric helpers shared by the regression engines.
pub mod linalg;

pub use linalg::{add_intercept, invert};
