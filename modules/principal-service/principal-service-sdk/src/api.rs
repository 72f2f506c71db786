//! Public API trait for the principal service.

use std::any::Any;

use grantkit_security::SecurityContext;

use crate::error::PrincipalServiceError;
use crate::transformer::OutputType;

/// Unwraps a principal into application-specific representations.
///
/// Registered in the component registry by the module and consumed by
/// application code:
///
/// ```ignore
/// let service = registry.get::<dyn PrincipalService>("principalService").unwrap();
///
/// let features: FeaturesHolder = service.unwrap(principal)?;
/// ```
pub trait PrincipalService: Send + Sync {
    /// Transform `principal` into the representation identified by `output`.
    ///
    /// Prefer the typed [`unwrap`](#method.unwrap) on `dyn PrincipalService`.
    ///
    /// # Errors
    ///
    /// - `NoTransformer` if nothing produces `output`
    /// - `EmptyResult` if the transformer produced nothing for `principal`
    fn unwrap_any(
        &self,
        principal: Option<&SecurityContext>,
        output: OutputType,
    ) -> Result<Box<dyn Any + Send>, PrincipalServiceError>;
}

impl dyn PrincipalService {
    /// Transform `principal` into a `T`.
    ///
    /// # Errors
    ///
    /// - `NoTransformer` if no transformer produces `T`
    /// - `EmptyResult` if the transformer produced nothing for `principal`
    /// - `TypeMismatch` if the transformer broke its declared output type
    pub fn unwrap<T: Send + 'static>(
        &self,
        principal: Option<&SecurityContext>,
    ) -> Result<T, PrincipalServiceError> {
        let output = OutputType::of::<T>();
        self.unwrap_any(principal, output)?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| PrincipalServiceError::TypeMismatch {
                type_name: output.type_name(),
            })
    }
}

/// Human readable principal description for errors and logs.
#[must_use]
pub fn describe_principal(principal: Option<&SecurityContext>) -> String {
    principal.map_or_else(|| "<anonymous>".to_owned(), SecurityContext::name)
}
