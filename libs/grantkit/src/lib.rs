#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Grantkit core library.
//!
//! - [`ComponentRegistry`] - name + type keyed component lookup used for wiring
//! - [`FeatureKey`], [`FeaturesHolder`], [`FeaturesManager`] - application features
//!   granted to a principal, bound to a handler or left virtual
//! - [`FeatureCatalog`] - stable feature names for configuration files
//! - [`ConfigLoader`] - YAML + environment configuration sections

pub mod catalog;
pub mod config;
pub mod error;
pub mod feature;
pub mod registry;

pub use catalog::FeatureCatalog;
pub use config::ConfigLoader;
pub use error::{ConfigError, RegistryError};
pub use feature::{ErasedHandler, FeatureBinding, FeatureKey, FeaturesHolder, FeaturesManager};
pub use registry::ComponentRegistry;
