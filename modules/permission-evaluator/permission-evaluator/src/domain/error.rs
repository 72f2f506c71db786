use thiserror::Error;

/// Evaluator chain wiring errors.
#[derive(Debug, Error)]
pub enum ChainConfigError {
    /// A link was given an empty name.
    #[error("evaluator chain link at position {position} has an empty name")]
    EmptyLinkName { position: usize },

    /// A configured link is not registered as a `ChainedPermissionEvaluator`.
    #[error("unknown evaluator chain link '{name}'")]
    UnknownLink { name: String },

    /// The same link appears twice.
    #[error("evaluator chain link '{name}' is already part of the chain")]
    DuplicateLink { name: String },
}
