//! Domain layer for the principal service.

pub mod error;
pub mod features_transformer;
pub mod service;

pub use error::ConfigError;
pub use features_transformer::{FeaturesHolderTransformer, FeaturesHolderTransformerBuilder};
pub use service::{DefaultPrincipalService, DefaultPrincipalServiceBuilder};
