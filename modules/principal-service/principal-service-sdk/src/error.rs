//! Error types for the principal service.

use thiserror::Error;

/// Errors returned by [`crate::PrincipalService`].
///
/// All variants are wiring mistakes: the application asked for a representation
/// nobody can produce. Callers should not catch or retry them.
#[derive(Debug, Error)]
pub enum PrincipalServiceError {
    /// No transformer produces the requested representation.
    #[error(
        "unable to transform principal {principal} into '{type_name}': no transformer registered"
    )]
    NoTransformer {
        type_name: &'static str,
        principal: String,
    },

    /// The transformer was found but produced nothing.
    #[error("transformation of principal {principal} into '{type_name}' led to an empty result")]
    EmptyResult {
        type_name: &'static str,
        principal: String,
    },

    /// The transformer produced a value of a different type than it declared.
    #[error("transformer for '{type_name}' produced a value of another type")]
    TypeMismatch { type_name: &'static str },
}
