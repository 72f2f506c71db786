//! Application features granted to a principal.
//!
//! A feature is an abstract capability, expressed as a trait-object type such as
//! `dyn BeNiceFeature`. When a principal is granted a feature, the feature is
//! either bound to a concrete handler (`Arc<dyn BeNiceFeature>`) found in the
//! [`crate::ComponentRegistry`], or it is *virtual*: granted, but nothing
//! implements it. Callers must tolerate virtual features.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Type-erased handler. Always holds an `Arc<F>` for the feature type `F`.
pub type ErasedHandler = Arc<dyn Any + Send + Sync>;

/// Identity of a feature type.
#[derive(Clone, Copy)]
pub struct FeatureKey {
    id: TypeId,
    name: &'static str,
}

impl FeatureKey {
    #[must_use]
    pub fn of<F: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<F>(),
            name: type_name::<F>(),
        }
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, for diagnostics only.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for FeatureKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FeatureKey {}

impl Hash for FeatureKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// How a granted feature is backed.
#[derive(Clone)]
pub enum FeatureBinding {
    /// Bound to the handler registered under `handler_name`.
    Implemented {
        handler_name: String,
        handler: ErasedHandler,
    },
    /// Granted, but no handler is registered.
    Virtual,
}

impl FeatureBinding {
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual)
    }

    #[must_use]
    pub fn handler_name(&self) -> Option<&str> {
        match self {
            Self::Implemented { handler_name, .. } => Some(handler_name),
            Self::Virtual => None,
        }
    }
}

impl fmt::Debug for FeatureBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implemented { handler_name, .. } => f
                .debug_struct("Implemented")
                .field("handler_name", handler_name)
                .finish_non_exhaustive(),
            Self::Virtual => f.write_str("Virtual"),
        }
    }
}

/// Features granted to one principal.
///
/// Built by [`FeaturesManager`] and never mutated afterwards. Iteration follows
/// grant order.
#[derive(Clone, Default)]
pub struct FeaturesHolder {
    entries: Vec<(FeatureKey, FeatureBinding)>,
    index: HashMap<FeatureKey, usize>,
}

impl FeaturesHolder {
    /// Whether `F` was granted, implemented or not.
    #[must_use]
    pub fn has_feature<F: ?Sized + 'static>(&self) -> bool {
        self.contains_key(&FeatureKey::of::<F>())
    }

    #[must_use]
    pub fn contains_key(&self, key: &FeatureKey) -> bool {
        self.index.contains_key(key)
    }

    /// Whether `F` was granted without a handler.
    #[must_use]
    pub fn is_virtual<F: ?Sized + 'static>(&self) -> bool {
        self.binding(&FeatureKey::of::<F>())
            .is_some_and(FeatureBinding::is_virtual)
    }

    /// Handler backing `F`; `None` when `F` is virtual or not granted.
    #[must_use]
    pub fn feature<F: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<F>> {
        match self.binding(&FeatureKey::of::<F>())? {
            FeatureBinding::Implemented { handler, .. } => {
                handler.downcast_ref::<Arc<F>>().cloned()
            }
            FeatureBinding::Virtual => None,
        }
    }

    #[must_use]
    pub fn binding(&self, key: &FeatureKey) -> Option<&FeatureBinding> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Granted feature keys in grant order.
    pub fn keys(&self) -> impl Iterator<Item = &FeatureKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FeatureKey, &FeatureBinding)> {
        self.entries.iter().map(|(key, binding)| (key, binding))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for FeaturesHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Mutable builder of a [`FeaturesHolder`].
///
/// The first binding of a feature wins; later additions of the same feature are
/// ignored and reported as `false`.
#[derive(Default)]
pub struct FeaturesManager {
    holder: FeaturesHolder,
}

impl FeaturesManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_feature_key(&self, key: &FeatureKey) -> bool {
        self.holder.contains_key(key)
    }

    /// Bind `F` to a handler.
    pub fn add_feature<F: ?Sized + Send + Sync + 'static>(
        &mut self,
        handler_name: impl Into<String>,
        handler: Arc<F>,
    ) -> bool {
        self.add_erased(FeatureKey::of::<F>(), handler_name.into(), Arc::new(handler))
    }

    /// Bind the feature identified by `key` to an already type-erased handler.
    ///
    /// `handler` must hold an `Arc<F>` where `F` is the type behind `key`, as
    /// returned by [`crate::ComponentRegistry::first_component`].
    pub fn add_erased(
        &mut self,
        key: FeatureKey,
        handler_name: String,
        handler: ErasedHandler,
    ) -> bool {
        self.insert(
            key,
            FeatureBinding::Implemented {
                handler_name,
                handler,
            },
        )
    }

    /// Grant `key` without a handler.
    pub fn add_virtual_feature(&mut self, key: FeatureKey) -> bool {
        self.insert(key, FeatureBinding::Virtual)
    }

    fn insert(&mut self, key: FeatureKey, binding: FeatureBinding) -> bool {
        if self.holder.contains_key(&key) {
            return false;
        }
        self.holder.index.insert(key, self.holder.entries.len());
        self.holder.entries.push((key, binding));
        true
    }

    #[must_use]
    pub fn into_holder(self) -> FeaturesHolder {
        self.holder
    }
}
