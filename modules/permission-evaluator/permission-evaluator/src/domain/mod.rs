//! Domain layer for the permission evaluator.

mod chain;
mod deny_all;
mod error;

pub use chain::{EvaluatorChain, EvaluatorChainBuilder};
pub use deny_all::{DENY_ALL_NAME, DenyAllEvaluator};
pub use error::ChainConfigError;
