//! Principal Service Module
//!
//! Resolves the application features granted to a principal and unwraps
//! principals into application-specific representations through a type-keyed
//! table of transformers.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bootstrap;
pub mod config;
pub mod domain;

pub use bootstrap::{FEATURES_TRANSFORMER_NAME, PRINCIPAL_SERVICE_NAME, bootstrap};
pub use config::PrincipalServiceConfig;
pub use domain::{
    ConfigError, DefaultPrincipalService, DefaultPrincipalServiceBuilder,
    FeaturesHolderTransformer, FeaturesHolderTransformerBuilder,
};
