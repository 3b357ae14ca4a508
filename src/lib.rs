//! ruleguard — custom detection rules for a static-analysis security scanner.
//!
//! Users describe a rule as a target language, a severity, a confidence and
//! one or more regular expressions combined by a match mode. This crate
//! validates those definitions, resolves the match mode and compiles the
//! expressions into the form the text scanning engine consumes.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use ruleguard::{load_rules, LoadOptions};
//! use ruleguard::rules::Language;
//!
//! let set = load_rules(Path::new("."), &LoadOptions::default()).unwrap();
//! for rule in set.for_language(Language::Java) {
//!     println!("{} ({}): {} matcher(s)", rule.name, rule.match_type, rule.expressions.len());
//! }
//! ```

pub mod checks;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use config::Config;
use error::Result;
use output::OutputFormat;
use rules::{RuleSet, Severity};

/// Options for loading custom rules.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Path to config file (defaults to `.ruleguard.toml` in the root dir).
    pub config_path: Option<PathBuf>,
    /// Override for the policy's `min_severity`.
    pub min_severity_override: Option<Severity>,
    /// Install the stderr subscriber using the config's `log_level`.
    pub init_logging: bool,
}

/// Load config, then read, validate and filter the configured custom rules.
pub fn load_rules(root: &Path, options: &LoadOptions) -> Result<RuleSet> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| root.join(".ruleguard.toml"));
    let mut config = Config::load(&config_path)?;
    if options.init_logging {
        config.init_logging();
    }

    if let Some(min) = options.min_severity_override {
        config.policy.min_severity = Some(min);
    }

    let set = config.load_rule_set()?;
    tracing::info!(
        loaded = set.len(),
        rejected = set.rejected().len(),
        "custom rules loaded"
    );
    Ok(set)
}

/// Render a rule set in the specified format.
pub fn render_rules(set: &RuleSet, format: OutputFormat) -> Result<String> {
    output::render_rules(set, format)
}

/// Install a stderr `tracing` subscriber. `RUST_LOG` wins over `directive`.
/// Does nothing if a global subscriber is already set.
pub fn init_logging(directive: &str) {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref(), directive);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Filter from `rust_log` if it parses, else `directive`, else `info`.
pub(crate) fn log_filter(rust_log: Option<&str>, directive: &str) -> EnvFilter {
    rust_log
        .and_then(|env| EnvFilter::try_new(env).ok())
        .or_else(|| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
