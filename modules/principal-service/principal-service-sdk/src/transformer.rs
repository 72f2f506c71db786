//! Principal transformer traits.

use std::any::{Any, TypeId, type_name};
use std::fmt;

use grantkit_security::SecurityContext;

/// Converts a principal into one application-specific representation.
///
/// `principal` is `None` for anonymous callers; each transformer decides what
/// that means for its representation.
pub trait PrincipalTransformer: Send + Sync {
    /// The representation this transformer produces.
    type Output: Send + 'static;

    /// Transform the principal. `None` means the transformation produced nothing.
    fn apply(&self, principal: Option<&SecurityContext>) -> Option<Self::Output>;
}

/// Identity of a representation type produced by a transformer.
#[derive(Clone, Copy)]
pub struct OutputType {
    id: TypeId,
    name: &'static str,
}

impl OutputType {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for OutputType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OutputType {}

impl fmt::Debug for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Object-safe view of a [`PrincipalTransformer`].
///
/// Implemented for every `PrincipalTransformer`; transformers are registered and
/// discovered as `dyn DynPrincipalTransformer`.
pub trait DynPrincipalTransformer: Send + Sync {
    /// The representation type this transformer declares it produces.
    fn output_type(&self) -> OutputType;

    /// Transform the principal, boxing the result.
    fn apply_dyn(&self, principal: Option<&SecurityContext>) -> Option<Box<dyn Any + Send>>;
}

impl<T> DynPrincipalTransformer for T
where
    T: PrincipalTransformer,
{
    fn output_type(&self) -> OutputType {
        OutputType::of::<T::Output>()
    }

    fn apply_dyn(&self, principal: Option<&SecurityContext>) -> Option<Box<dyn Any + Send>> {
        self.apply(principal)
            .map(|output| Box::new(output) as Box<dyn Any + Send>)
    }
}
