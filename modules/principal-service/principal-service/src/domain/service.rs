//! Default principal service.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use grantkit::ComponentRegistry;
use grantkit_security::SecurityContext;
use principal_service_sdk::{
    DynPrincipalTransformer, OutputType, PrincipalService, PrincipalServiceError,
    describe_principal,
};
use tracing::{debug, error};

use super::error::ConfigError;

struct Registered {
    name: String,
    output: OutputType,
    transformer: Arc<dyn DynPrincipalTransformer>,
}

/// Type-keyed principal unwrapping.
///
/// Holds one transformer per representation type. The table is fixed at
/// construction: either the transformers given explicitly to the builder, or,
/// when none were given, every `dyn DynPrincipalTransformer` found in the
/// owning component registry.
pub struct DefaultPrincipalService {
    transformers: HashMap<TypeId, Registered>,
}

impl DefaultPrincipalService {
    #[must_use]
    pub fn builder() -> DefaultPrincipalServiceBuilder {
        DefaultPrincipalServiceBuilder::default()
    }

    /// Transform `principal` into a `T`.
    ///
    /// # Errors
    ///
    /// See [`PrincipalService::unwrap_any`].
    pub fn unwrap<T: Send + 'static>(
        &self,
        principal: Option<&SecurityContext>,
    ) -> Result<T, PrincipalServiceError> {
        let service: &dyn PrincipalService = self;
        service.unwrap(principal)
    }

    /// Whether a transformer produces `T`.
    #[must_use]
    pub fn supports<T: ?Sized + 'static>(&self) -> bool {
        self.transformers.contains_key(&TypeId::of::<T>())
    }

    fn transform(
        &self,
        principal: Option<&SecurityContext>,
        output: OutputType,
    ) -> Result<Box<dyn Any + Send>, PrincipalServiceError> {
        let Some(registered) = self.transformers.get(&output.type_id()) else {
            return Err(PrincipalServiceError::NoTransformer {
                type_name: output.type_name(),
                principal: describe_principal(principal),
            });
        };

        registered
            .transformer
            .apply_dyn(principal)
            .ok_or_else(|| PrincipalServiceError::EmptyResult {
                type_name: output.type_name(),
                principal: describe_principal(principal),
            })
    }
}

impl PrincipalService for DefaultPrincipalService {
    #[tracing::instrument(skip_all, fields(output = output.type_name()))]
    fn unwrap_any(
        &self,
        principal: Option<&SecurityContext>,
        output: OutputType,
    ) -> Result<Box<dyn Any + Send>, PrincipalServiceError> {
        self.transform(principal, output).inspect_err(|e| {
            error!(error = %e, "principal unwrap failed");
        })
    }
}

impl fmt::Debug for DefaultPrincipalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for registered in self.transformers.values() {
            map.entry(&registered.output, &registered.name);
        }
        map.finish()
    }
}

/// Builder for [`DefaultPrincipalService`].
#[derive(Default)]
pub struct DefaultPrincipalServiceBuilder {
    explicit: Vec<(String, Arc<dyn DynPrincipalTransformer>)>,
    owning_registry: Option<Arc<ComponentRegistry>>,
    registry_rebound: bool,
}

impl DefaultPrincipalServiceBuilder {
    /// Use `transformer` for the representation it declares. Disables discovery.
    #[must_use]
    pub fn transformer(
        mut self,
        name: impl Into<String>,
        transformer: Arc<dyn DynPrincipalTransformer>,
    ) -> Self {
        self.explicit.push((name.into(), transformer));
        self
    }

    /// Registry scanned for transformers when none were given explicitly.
    /// May be bound only once.
    #[must_use]
    pub fn owning_registry(mut self, registry: Arc<ComponentRegistry>) -> Self {
        if self.owning_registry.is_some() {
            self.registry_rebound = true;
        }
        self.owning_registry = Some(registry);
        self
    }

    /// Validate and build the transformer table.
    ///
    /// # Errors
    ///
    /// - `RegistryAlreadyBound` if the owning registry was bound twice
    /// - `MissingComponentRegistry` if there is neither an explicit transformer nor a registry
    /// - `DuplicateTransformer` if two transformers produce the same type
    pub fn build(self) -> Result<DefaultPrincipalService, ConfigError> {
        if self.registry_rebound {
            return Err(ConfigError::RegistryAlreadyBound);
        }

        let candidates = if self.explicit.is_empty() {
            let registry = self
                .owning_registry
                .ok_or(ConfigError::MissingComponentRegistry)?;
            registry.components_of::<dyn DynPrincipalTransformer>()
        } else {
            self.explicit
        };

        let mut transformers: HashMap<TypeId, Registered> =
            HashMap::with_capacity(candidates.len());
        for (name, transformer) in candidates {
            let output = transformer.output_type();
            if let Some(existing) = transformers.get(&output.type_id()) {
                return Err(ConfigError::DuplicateTransformer {
                    type_name: output.type_name(),
                    first: existing.name.clone(),
                    second: name,
                });
            }
            transformers.insert(
                output.type_id(),
                Registered {
                    name,
                    output,
                    transformer,
                },
            );
        }

        let service = DefaultPrincipalService { transformers };
        debug!(transformers = ?service, "Principal service initialized");
        Ok(service)
    }
}
