//! Configuration errors for the principal service.

/// Wiring errors, detected when components are built. Always fatal.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("please provide the authority granted to anonymous callers")]
    MissingAnonymousAuthority,

    #[error("please provide the component registry")]
    MissingComponentRegistry,

    #[error("owning component registry already bound")]
    RegistryAlreadyBound,

    #[error("features for authority '{authority}' are defined more than once")]
    DuplicateAuthority { authority: String },

    #[error("transformers '{first}' and '{second}' both produce '{type_name}'")]
    DuplicateTransformer {
        type_name: &'static str,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Catalog(#[from] grantkit::ConfigError),
}
