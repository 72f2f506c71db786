#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use figment::providers::{Format, Yaml};
use figment::{Figment, Jail};
use grantkit::{ConfigError, ConfigLoader};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
struct SampleConfig {
    anonymous_authority: String,
    authority_features: HashMap<String, Vec<String>>,
}

/// Loader without the environment layer, so parallel `Jail` tests cannot leak in.
fn yaml_only(yaml: &str) -> ConfigLoader {
    ConfigLoader::from_figment(Figment::from(Yaml::string(yaml)))
}

#[test]
fn reads_section_from_yaml() {
    let loader = yaml_only(
        r#"
sample:
  anonymous_authority: "guest"
  authority_features:
    guest: ["be_nice"]
"#,
    );

    let cfg: SampleConfig = loader.section("sample").unwrap();
    assert_eq!(cfg.anonymous_authority, "guest");
    assert_eq!(cfg.authority_features["guest"], vec!["be_nice".to_owned()]);
}

#[test]
fn absent_section_yields_defaults() {
    let loader = yaml_only("other: {}\n");

    let cfg: SampleConfig = loader.section("sample").unwrap();
    assert_eq!(cfg, SampleConfig::default());
}

#[test]
fn unknown_field_is_rejected() {
    let loader = yaml_only("sample:\n  anonymus_authority: typo\n");

    let err = loader.section::<SampleConfig>("sample").unwrap_err();
    assert!(matches!(err, ConfigError::Section { ref section, .. } if section == "sample"));
}

#[test]
fn environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "grantkit.yaml",
            "sample:\n  anonymous_authority: anonymous\n",
        )?;
        jail.set_env("GRANTKIT_SAMPLE__ANONYMOUS_AUTHORITY", "guest");

        let loader = ConfigLoader::from_yaml_file("grantkit.yaml");
        let cfg: SampleConfig = loader.section("sample").map_err(|e| e.to_string())?;
        assert_eq!(cfg.anonymous_authority, "guest");
        Ok(())
    });
}

#[test]
fn environment_overrides_inline_yaml() {
    Jail::expect_with(|jail| {
        jail.set_env("GRANTKIT_SAMPLE__ANONYMOUS_AUTHORITY", "visitor");

        let loader = ConfigLoader::from_yaml_str("sample:\n  anonymous_authority: anonymous\n");
        let cfg: SampleConfig = loader.section("sample").map_err(|e| e.to_string())?;
        assert_eq!(cfg.anonymous_authority, "visitor");
        Ok(())
    });
}
