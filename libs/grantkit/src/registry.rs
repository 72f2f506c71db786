//! Component registry used to wire transformers, feature handlers and
//! permission evaluators together.
//!
//! Components are registered under a name and a (usually trait-object) type:
//!
//! ```ignore
//! let registry = ComponentRegistry::new();
//! registry.register::<dyn BeNiceFeature>("smiley", Arc::new(Smiley))?;
//!
//! let all: Vec<(String, Arc<dyn BeNiceFeature>)> = registry.components_of::<dyn BeNiceFeature>();
//! ```
//!
//! Lookups return components in registration order, so "first registered wins"
//! is deterministic.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::RegistryError;
use crate::feature::ErasedHandler;

struct Entry {
    name: String,
    type_name: &'static str,
    /// Always an `Arc<T>` for the type the entry is filed under.
    component: ErasedHandler,
}

/// Name + type keyed component lookup.
///
/// Populated during wiring, read-only afterwards. Reads take a shared lock and
/// clone `Arc`s out, so no lock is held while a component runs.
#[derive(Default)]
pub struct ComponentRegistry {
    components: RwLock<HashMap<TypeId, Vec<Entry>>>,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under `name` for type `T`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateComponent`] if `name` is already registered for `T`.
    pub fn register<T>(
        &self,
        name: impl Into<String>,
        component: Arc<T>,
    ) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let name = name.into();
        let mut guard = self.components.write();
        let entries = guard.entry(TypeId::of::<T>()).or_default();
        if entries.iter().any(|e| e.name == name) {
            return Err(RegistryError::DuplicateComponent {
                name,
                type_name: type_name::<T>(),
            });
        }

        tracing::debug!(
            component = %name,
            type_name = type_name::<T>(),
            "Registered component"
        );
        entries.push(Entry {
            name,
            type_name: type_name::<T>(),
            component: Arc::new(component),
        });
        Ok(())
    }

    /// All components registered for `T`, in registration order.
    #[must_use]
    pub fn components_of<T>(&self) -> Vec<(String, Arc<T>)>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let guard = self.components.read();
        guard
            .get(&TypeId::of::<T>())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| {
                        e.component
                            .downcast_ref::<Arc<T>>()
                            .map(|c| (e.name.clone(), Arc::clone(c)))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Component registered under `name` for `T`.
    #[must_use]
    pub fn get<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let guard = self.components.read();
        guard
            .get(&TypeId::of::<T>())?
            .iter()
            .find(|e| e.name == name)
            .and_then(|e| e.component.downcast_ref::<Arc<T>>())
            .map(Arc::clone)
    }

    /// First component registered for the type identified by `type_id`, type-erased.
    ///
    /// The returned handler holds an `Arc<T>`; see [`crate::FeaturesManager::add_erased`].
    #[must_use]
    pub fn first_component(&self, type_id: TypeId) -> Option<(String, ErasedHandler)> {
        let guard = self.components.read();
        guard
            .get(&type_id)?
            .first()
            .map(|e| (e.name.clone(), Arc::clone(&e.component)))
    }

    #[must_use]
    pub fn contains<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.components
            .read()
            .get(&TypeId::of::<T>())
            .is_some_and(|entries| !entries.is_empty())
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.components.read();
        let mut list = f.debug_list();
        for entry in guard.values().flatten() {
            list.entry(&format_args!("{}: {}", entry.name, entry.type_name));
        }
        list.finish()
    }
}
