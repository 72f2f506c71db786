#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Principal Service SDK
//!
//! This crate provides the public API for the `principal_service` module:
//!
//! - [`PrincipalService`] - Public API trait for consumers
//! - [`PrincipalTransformer`] - Typed trait for transformer implementations
//! - [`DynPrincipalTransformer`] - Object-safe form, used for registration and lookup
//! - [`PrincipalServiceError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use principal_service_sdk::PrincipalService;
//!
//! let service: Arc<dyn PrincipalService> = registry.get("principalService").unwrap();
//!
//! // Anonymous callers pass `None`
//! let features: FeaturesHolder = service.unwrap(Some(&ctx))?;
//! ```

pub mod api;
pub mod error;
pub mod transformer;

pub use api::{PrincipalService, describe_principal};
pub use error::PrincipalServiceError;
pub use transformer::{DynPrincipalTransformer, OutputType, PrincipalTransformer};
