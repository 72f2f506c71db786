//! Permission evaluator wiring.

use std::sync::Arc;

use anyhow::Context;
use grantkit::{ComponentRegistry, ConfigLoader};
use permission_evaluator_sdk::PermissionEvaluator;
use tracing::info;

use crate::config::{CONFIG_SECTION, PermissionChainConfig};
use crate::domain::EvaluatorChain;

/// Registry name of the evaluator chain.
pub const PERMISSION_EVALUATOR_NAME: &str = "permissionEvaluator";

/// Build the evaluator chain from the `permission_evaluator` section and
/// register it in `registry` as `dyn PermissionEvaluator`.
///
/// The configured links must already be registered as
/// `dyn ChainedPermissionEvaluator`.
///
/// # Errors
///
/// Fails if the section is malformed, a link is empty, unknown or listed
/// twice, or if an evaluator is already registered under
/// [`PERMISSION_EVALUATOR_NAME`].
pub fn bootstrap(
    loader: &ConfigLoader,
    registry: &ComponentRegistry,
) -> anyhow::Result<Arc<dyn PermissionEvaluator>> {
    info!("Initializing permission_evaluator");

    let cfg: PermissionChainConfig = loader.section(CONFIG_SECTION)?;
    let chain =
        EvaluatorChain::from_config(&cfg, registry).context("invalid evaluator chain")?;
    info!(links = ?chain, "Loaded evaluator chain");

    let api: Arc<dyn PermissionEvaluator> = Arc::new(chain);
    registry.register(PERMISSION_EVALUATOR_NAME, Arc::clone(&api))?;

    info!("Permission evaluator initialized");
    Ok(api)
}
