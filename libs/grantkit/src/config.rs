//! Configuration loading.
//!
//! Sections are read from a YAML document and overridden by environment
//! variables prefixed with `GRANTKIT_`; `__` separates nested keys:
//!
//! ```yaml
//! principal_service:
//!   anonymous_authority: "anonymous"
//!   authority_features:
//!     anonymous: ["be_nice"]
//! ```
//!
//! `GRANTKIT_PRINCIPAL_SERVICE__ANONYMOUS_AUTHORITY=guest` overrides the
//! anonymous authority above.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "GRANTKIT_";

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    /// Load from a YAML file (missing files are treated as empty) plus environment.
    #[must_use]
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Self {
        Self::with_env(Figment::new().merge(Yaml::file(path.as_ref())))
    }

    /// Load from an inline YAML document plus environment.
    #[must_use]
    pub fn from_yaml_str(yaml: &str) -> Self {
        Self::with_env(Figment::new().merge(Yaml::string(yaml)))
    }

    /// Wrap an already assembled figment; no environment layer is added.
    #[must_use]
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    fn with_env(figment: Figment) -> Self {
        Self {
            figment: figment.merge(Env::prefixed(ENV_PREFIX).split("__")),
        }
    }

    /// Extract a named section. An absent section yields `T::default()`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Section`] if the section is present but malformed.
    pub fn section<T>(&self, name: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        if !self.figment.contains(name) {
            tracing::debug!(section = name, "Configuration section absent, using defaults");
            return Ok(T::default());
        }

        self.figment
            .extract_inner(name)
            .map_err(|e| ConfigError::Section {
                section: name.to_owned(),
                source: Box::new(e),
            })
    }
}
