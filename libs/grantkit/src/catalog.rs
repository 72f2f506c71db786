//! Stable names for feature types.
//!
//! Configuration files cannot name Rust types, so features are given short
//! names (`"be_nice"`) that map to a [`FeatureKey`].

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::feature::FeatureKey;

#[derive(Debug, Clone, Default)]
pub struct FeatureCatalog {
    by_name: HashMap<String, FeatureKey>,
}

impl FeatureCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the feature type `F`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateFeatureName`] if `name` already names another type.
    pub fn register<F: ?Sized + 'static>(&mut self, name: &str) -> Result<(), ConfigError> {
        let key = FeatureKey::of::<F>();
        match self.by_name.get(name) {
            Some(existing) if *existing != key => Err(ConfigError::DuplicateFeatureName {
                name: name.to_owned(),
                type_name: existing.type_name(),
            }),
            Some(_) => Ok(()),
            None => {
                self.by_name.insert(name.to_owned(), key);
                Ok(())
            }
        }
    }

    /// Resolve a configured feature name.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownFeature`] if nothing was registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<FeatureKey, ConfigError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownFeature {
                name: name.to_owned(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    trait Export {}
    trait Import {}

    #[test]
    fn resolves_registered_names() {
        let mut catalog = FeatureCatalog::new();
        catalog.register::<dyn Export>("export").unwrap();

        assert_eq!(catalog.resolve("export").unwrap(), FeatureKey::of::<dyn Export>());
    }

    #[test]
    fn unknown_name_is_a_config_error() {
        let catalog = FeatureCatalog::new();

        let err = catalog.resolve("import").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFeature { ref name } if name == "import"));
    }

    #[test]
    fn re_registering_same_type_is_idempotent() {
        let mut catalog = FeatureCatalog::new();
        catalog.register::<dyn Export>("export").unwrap();
        catalog.register::<dyn Export>("export").unwrap();

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn name_clash_between_types_is_rejected() {
        let mut catalog = FeatureCatalog::new();
        catalog.register::<dyn Export>("io").unwrap();

        let err = catalog.register::<dyn Import>("io").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateFeatureName { .. }));
    }
}
