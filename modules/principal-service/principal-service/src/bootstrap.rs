//! Principal service wiring.

use std::any::type_name;
use std::sync::Arc;

use anyhow::Context;
use grantkit::{ComponentRegistry, ConfigLoader, FeatureCatalog, RegistryError};
use principal_service_sdk::{DynPrincipalTransformer, PrincipalService};
use tracing::info;

use crate::config::{CONFIG_SECTION, PrincipalServiceConfig};
use crate::domain::{DefaultPrincipalService, FeaturesHolderTransformer};

/// Registry name of the features transformer.
pub const FEATURES_TRANSFORMER_NAME: &str = "featuresHolderTransformer";

/// Registry name of the principal service.
pub const PRINCIPAL_SERVICE_NAME: &str = "principalService";

/// Build the principal service from the `principal_service` section and
/// register it in `registry`.
///
/// Application transformers and feature handlers must be registered before
/// this is called: the features transformer binds handlers per request, but
/// the service collects its transformers once, here. Nothing is registered
/// unless the whole transformer table is valid.
///
/// # Errors
///
/// Fails if the section is malformed, names an unknown feature, or if a
/// component with the same name is already registered.
pub fn bootstrap(
    loader: &ConfigLoader,
    catalog: &FeatureCatalog,
    registry: &Arc<ComponentRegistry>,
) -> anyhow::Result<Arc<dyn PrincipalService>> {
    info!("Initializing principal_service");

    let cfg: PrincipalServiceConfig = loader.section(CONFIG_SECTION)?;
    info!(
        anonymous_authority = %cfg.anonymous_authority,
        authorities = cfg.authority_features.len(),
        "Loaded principal service configuration"
    );

    ensure_vacant::<dyn DynPrincipalTransformer>(registry, FEATURES_TRANSFORMER_NAME)?;
    ensure_vacant::<dyn PrincipalService>(registry, PRINCIPAL_SERVICE_NAME)?;

    let transformer = FeaturesHolderTransformer::from_config(&cfg, catalog, Arc::clone(registry))
        .context("invalid features transformer configuration")?;
    let transformer: Arc<dyn DynPrincipalTransformer> = Arc::new(transformer);

    // Validate the complete transformer table before anything is registered.
    let service = registry
        .components_of::<dyn DynPrincipalTransformer>()
        .into_iter()
        .fold(DefaultPrincipalService::builder(), |builder, (name, t)| {
            builder.transformer(name, t)
        })
        .transformer(FEATURES_TRANSFORMER_NAME, Arc::clone(&transformer))
        .build()
        .context("invalid principal service configuration")?;

    registry.register(FEATURES_TRANSFORMER_NAME, transformer)?;
    let api: Arc<dyn PrincipalService> = Arc::new(service);
    registry.register(PRINCIPAL_SERVICE_NAME, Arc::clone(&api))?;

    info!("Principal service initialized");
    Ok(api)
}

fn ensure_vacant<T>(registry: &ComponentRegistry, name: &str) -> Result<(), RegistryError>
where
    T: ?Sized + Send + Sync + 'static,
{
    if registry.get::<T>(name).is_some() {
        return Err(RegistryError::DuplicateComponent {
            name: name.to_owned(),
            type_name: type_name::<T>(),
        });
    }
    Ok(())
}
