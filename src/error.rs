use thiserror::Error;

use crate::rules::ValidationErrors;

pub type Result<T> = std::result::Result<T, RuleError>;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid custom rule ({rule}): {errors}")]
    Validation {
        rule: String,
        errors: ValidationErrors,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A single rule expression that failed to compile.
///
/// Reported and skipped; never fails the owning rule.
#[derive(Error, Debug)]
#[error("failed to compile expression #{index} `{expression}`: {source}")]
pub struct PatternCompileError {
    /// Position in the rule's `expressions` list.
    pub index: usize,
    pub expression: String,
    #[source]
    pub source: regex::Error,
}
