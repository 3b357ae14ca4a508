use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};
use crate::rules::{RulePolicy, RuleSet};

/// Top-level configuration from `.ruleguard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON file holding an array of custom rules. Relative paths resolve
    /// against the directory of the config file.
    #[serde(default)]
    pub custom_rules_path: Option<PathBuf>,
    /// `tracing` filter directive applied by [`Config::init_logging`].
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub policy: RulePolicy,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            custom_rules_path: None,
            log_level: default_log_level(),
            policy: RulePolicy::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        if let (Some(rules_path), Some(dir)) = (config.custom_rules_path.as_mut(), path.parent()) {
            if rules_path.is_relative() {
                *rules_path = dir.join(&*rules_path);
            }
        }
        Ok(config)
    }

    /// Read, validate and filter the configured custom rules.
    ///
    /// No configured path yields an empty set; a configured path that
    /// cannot be read is an error.
    pub fn load_rule_set(&self) -> Result<RuleSet> {
        let Some(path) = &self.custom_rules_path else {
            return Ok(RuleSet::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuleError::Config(format!(
                "cannot read custom rules file {}: {e}",
                path.display()
            ))
        })?;
        let set = RuleSet::from_json(&content)?;
        Ok(self.policy.apply(set))
    }

    /// Install the stderr subscriber with `log_level` (`RUST_LOG` wins).
    pub fn init_logging(&self) {
        crate::init_logging(&self.log_level);
    }

    pub(crate) fn log_filter(&self, rust_log: Option<&str>) -> tracing_subscriber::EnvFilter {
        crate::log_filter(rust_log, &self.log_level)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# ruleguard configuration

# JSON array of custom rules, relative to this file.
# custom_rules_path = "custom-rules.json"

# tracing filter directive (overridden by RUST_LOG).
log_level = "info"

[policy]
# Rule IDs to ignore entirely.
# ignore_rules = ["6b2a8d62-3f5e-4c1a-9d7e-0f3b2c1a4e5d"]

# Drop rules below this severity (UNKNOWN, INFO, LOW, MEDIUM, HIGH, CRITICAL;
# any case).
# min_severity = "low"
"#
    }
}
