//! Principal to [`FeaturesHolder`] transformer.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use grantkit::{ComponentRegistry, FeatureCatalog, FeatureKey, FeaturesHolder, FeaturesManager};
use grantkit_security::{GrantedAuthority, SecurityContext};
use principal_service_sdk::PrincipalTransformer;
use tracing::{debug, trace};

use super::error::ConfigError;
use crate::config::PrincipalServiceConfig;

/// Resolves the features granted to a principal.
///
/// Each authority of the principal maps to a set of feature types. A granted
/// feature is bound to the first handler registered for it in the component
/// registry, or left virtual when there is none. Callers without a principal
/// are resolved as if they held only the anonymous authority.
pub struct FeaturesHolderTransformer {
    anonymous: GrantedAuthority,
    registry: Arc<ComponentRegistry>,
    features: HashMap<GrantedAuthority, Vec<FeatureKey>>,
}

impl FeaturesHolderTransformer {
    #[must_use]
    pub fn builder() -> FeaturesHolderTransformerBuilder {
        FeaturesHolderTransformerBuilder::default()
    }

    /// Build from configuration, resolving feature names through `catalog`.
    ///
    /// # Errors
    ///
    /// - `Catalog` if a configured feature name is unknown
    /// - `MissingAnonymousAuthority` if the anonymous authority is empty
    pub fn from_config(
        cfg: &PrincipalServiceConfig,
        catalog: &FeatureCatalog,
        registry: Arc<ComponentRegistry>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Self::builder().component_registry(registry);
        if !cfg.anonymous_authority.is_empty() {
            builder = builder.anonymous_authority(cfg.anonymous_authority.as_str());
        }

        for (authority, names) in &cfg.authority_features {
            let keys = names
                .iter()
                .map(|name| catalog.resolve(name))
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.authority_features(authority.as_str(), keys);
        }

        builder.build()
    }

    #[must_use]
    pub fn anonymous_authority(&self) -> &GrantedAuthority {
        &self.anonymous
    }

    /// Resolve the features granted by `authorities`, in input order.
    #[must_use]
    pub fn resolve<'a, I>(&self, authorities: I) -> FeaturesHolder
    where
        I: IntoIterator<Item = &'a GrantedAuthority>,
    {
        let mut manager = FeaturesManager::new();
        for authority in authorities {
            let Some(features) = self.features.get(authority) else {
                continue;
            };
            for key in features {
                if manager.has_feature_key(key) {
                    continue;
                }
                self.add_feature(&mut manager, *key);
            }
        }
        manager.into_holder()
    }

    fn add_feature(&self, manager: &mut FeaturesManager, key: FeatureKey) {
        let handler = self.registry.first_component(key.type_id());
        if let Some((handler_name, handler)) = handler {
            trace!(feature = %key, handler = %handler_name, "Binding feature to handler");
            manager.add_erased(key, handler_name, handler);
        } else {
            trace!(feature = %key, "No handler registered, adding virtual feature");
            manager.add_virtual_feature(key);
        }
    }
}

impl PrincipalTransformer for FeaturesHolderTransformer {
    type Output = FeaturesHolder;

    fn apply(&self, principal: Option<&SecurityContext>) -> Option<FeaturesHolder> {
        let holder = match principal {
            Some(ctx) => self.resolve(ctx.authorities()),
            None => self.resolve([&self.anonymous]),
        };
        Some(holder)
    }
}

impl fmt::Debug for FeaturesHolderTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeaturesHolderTransformer")
            .field("anonymous", &self.anonymous)
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}

/// Plain builder for [`FeaturesHolderTransformer`]; all checks run in [`build`](Self::build).
#[derive(Default)]
pub struct FeaturesHolderTransformerBuilder {
    anonymous: Option<GrantedAuthority>,
    registry: Option<Arc<ComponentRegistry>>,
    features: HashMap<GrantedAuthority, Vec<FeatureKey>>,
    defined: HashSet<GrantedAuthority>,
    duplicate_authority: Option<GrantedAuthority>,
}

impl FeaturesHolderTransformerBuilder {
    /// Authority resolved for callers without a principal.
    #[must_use]
    pub fn anonymous_authority(mut self, authority: impl Into<GrantedAuthority>) -> Self {
        self.anonymous = Some(authority.into());
        self
    }

    /// Registry searched for feature handlers.
    #[must_use]
    pub fn component_registry(mut self, registry: Arc<ComponentRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Define the features granted to `authority`. Defining the same authority
    /// twice is reported by `build`; grants made with [`grant`](Self::grant) are
    /// kept.
    #[must_use]
    pub fn authority_features<I>(
        mut self,
        authority: impl Into<GrantedAuthority>,
        features: I,
    ) -> Self
    where
        I: IntoIterator<Item = FeatureKey>,
    {
        let authority = authority.into();
        if !self.defined.insert(authority.clone()) {
            self.duplicate_authority.get_or_insert(authority);
            return self;
        }
        let keys = self.features.entry(authority).or_default();
        for key in features {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        self
    }

    /// Grant the feature type `F` to `authority`, keeping earlier grants.
    #[must_use]
    pub fn grant<F: ?Sized + 'static>(mut self, authority: impl Into<GrantedAuthority>) -> Self {
        let key = FeatureKey::of::<F>();
        let keys = self.features.entry(authority.into()).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// - `MissingAnonymousAuthority` / `MissingComponentRegistry` if either was not supplied
    /// - `DuplicateAuthority` if an authority's features were defined twice
    pub fn build(self) -> Result<FeaturesHolderTransformer, ConfigError> {
        let anonymous = self.anonymous.ok_or(ConfigError::MissingAnonymousAuthority)?;
        let registry = self.registry.ok_or(ConfigError::MissingComponentRegistry)?;
        if let Some(authority) = self.duplicate_authority {
            return Err(ConfigError::DuplicateAuthority {
                authority: authority.to_string(),
            });
        }

        let transformer = FeaturesHolderTransformer {
            anonymous,
            registry,
            features: self.features,
        };
        debug!(transformer = ?transformer, "Principal -> FeaturesHolder transformer initialized");
        Ok(transformer)
    }
}
