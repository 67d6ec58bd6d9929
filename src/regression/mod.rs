pub mod engine;
pub mod factory;
pub mod linear;
pub mod logistic;
