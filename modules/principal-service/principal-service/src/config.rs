//! Configuration for the principal service.

use std::collections::HashMap;

use grantkit_security::constants::ANONYMOUS_AUTHORITY;
use serde::Deserialize;

/// Name of the configuration section.
pub const CONFIG_SECTION: &str = "principal_service";

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrincipalServiceConfig {
    /// Authority resolved for callers without a principal. Must not be empty.
    pub anonymous_authority: String,

    /// Feature names (see `FeatureCatalog`) granted to each authority.
    pub authority_features: HashMap<String, Vec<String>>,
}

impl Default for PrincipalServiceConfig {
    fn default() -> Self {
        Self {
            anonymous_authority: ANONYMOUS_AUTHORITY.to_owned(),
            authority_features: HashMap::new(),
        }
    }
}
