//! Configuration for the permission evaluator.

use serde::Deserialize;

/// Name of the configuration section.
pub const CONFIG_SECTION: &str = "permission_evaluator";

/// Configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PermissionChainConfig {
    /// Names of `dyn ChainedPermissionEvaluator` components, in evaluation order.
    /// The deny-all link is always appended and must not be listed.
    pub links: Vec<String>,
}
