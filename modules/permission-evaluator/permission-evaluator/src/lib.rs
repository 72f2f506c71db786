//! Permission Evaluator Module
//!
//! Evaluates permissions through an ordered chain of
//! [`ChainedPermissionEvaluator`](permission_evaluator_sdk::ChainedPermissionEvaluator)
//! links. The first link supporting an input decides it; a deny-all link closes
//! every chain.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bootstrap;
pub mod config;
pub mod domain;

pub use bootstrap::{PERMISSION_EVALUATOR_NAME, bootstrap};
pub use config::PermissionChainConfig;
pub use domain::{
    ChainConfigError, DENY_ALL_NAME, DenyAllEvaluator, EvaluatorChain, EvaluatorChainBuilder,
};
