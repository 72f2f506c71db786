//! Inputs of a permission evaluation.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Permission being checked, e.g. `"read"` or `"invoice:approve"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Permission {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Permission {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Identifier of a target that has not been loaded.
///
/// Serialized untagged. Strings that parse as a UUID deserialize to
/// [`TargetId::Uuid`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetId {
    Uuid(Uuid),
    Int(i64),
    Str(String),
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(id) => fmt::Display::fmt(id, f),
            Self::Int(id) => fmt::Display::fmt(id, f),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<Uuid> for TargetId {
    fn from(id: Uuid) -> Self {
        Self::Uuid(id)
    }
}

impl From<i64> for TargetId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_owned())
    }
}

impl From<String> for TargetId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

/// A loaded target object.
///
/// Implemented for every `Debug` type. Evaluators recover the concrete type
/// with [`downcast_ref`](#method.downcast_ref):
///
/// ```ignore
/// fn supports_target(&self, _: &SecurityContext, target: &dyn PermissionTarget, _: &Permission) -> bool {
///     target.downcast_ref::<Invoice>().is_some()
/// }
/// ```
pub trait PermissionTarget: Any + fmt::Debug {}

impl<T: Any + fmt::Debug> PermissionTarget for T {}

impl dyn PermissionTarget {
    /// The target as a `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Invoice {
        number: u32,
    }

    #[test]
    fn target_downcasts_to_its_concrete_type() {
        let invoice = Invoice { number: 7 };
        let target: &dyn PermissionTarget = &invoice;

        assert_eq!(target.downcast_ref::<Invoice>().unwrap().number, 7);
        assert!(!target.is::<String>());
        assert_eq!(format!("{target:?}"), "Invoice { number: 7 }");
    }

    #[test]
    fn target_id_deserializes_untagged() {
        let id: TargetId = serde_json::from_str("42").unwrap();
        assert_eq!(id, TargetId::Int(42));

        let id: TargetId = serde_json::from_str("\"INV-7\"").unwrap();
        assert_eq!(id, TargetId::Str("INV-7".to_owned()));

        let id: TargetId =
            serde_json::from_str("\"67e55044-10b1-426f-9247-bb680e5fe0c8\"").unwrap();
        assert!(matches!(id, TargetId::Uuid(_)));
    }

    #[test]
    fn target_id_displays_bare_value() {
        assert_eq!(TargetId::from(42_i64).to_string(), "42");
        assert_eq!(TargetId::from("INV-7").to_string(), "INV-7");
        assert_eq!(TargetId::from(Uuid::nil()).to_string(), Uuid::nil().to_string());
    }

    #[test]
    fn permission_serializes_as_plain_string() {
        let json = serde_json::to_string(&Permission::new("read")).unwrap();
        assert_eq!(json, "\"read\"");
    }
}
