//! Error types for the grantkit core library.

use thiserror::Error;

/// Errors raised while wiring components into a [`crate::ComponentRegistry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A component with this name is already registered for the type.
    #[error("component '{name}' is already registered as '{type_name}'")]
    DuplicateComponent {
        name: String,
        type_name: &'static str,
    },
}

/// Configuration errors. Always fatal, never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration section '{section}': {source}")]
    Section {
        section: String,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("unknown feature '{name}'")]
    UnknownFeature { name: String },

    #[error("feature name '{name}' is already bound to '{type_name}'")]
    DuplicateFeatureName {
        name: String,
        type_name: &'static str,
    },
}
