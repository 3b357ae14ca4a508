//! Types handed to the text scanning engine.
//!
//! The engine walks target files and applies these rules; it lives outside
//! this crate. Only its input vocabulary is defined here.

use regex::Regex;
use uuid::Uuid;

use crate::rules::{Confidence, Language, Severity};

/// How the engine combines the expressions of one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// Every expression is applied on its own.
    Regular,
    /// Any expression matching is a finding.
    OrMatch,
    /// All expressions must match the same file.
    AndMatch,
    /// The first expression matches and the rest must not.
    NotMatch,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular => write!(f, "regular"),
            Self::OrMatch => write!(f, "or"),
            Self::AndMatch => write!(f, "and"),
            Self::NotMatch => write!(f, "not"),
        }
    }
}

/// A custom rule ready for the engine: compiled matchers, match type and
/// the metadata copied onto every finding.
#[derive(Debug, Clone)]
pub struct TextRule {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub language: Language,
    pub severity: Severity,
    pub confidence: Confidence,
    pub match_type: MatchType,
    pub expressions: Vec<Regex>,
}
