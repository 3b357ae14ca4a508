use serde::{Deserialize, Serialize};

use crate::engine::MatchType;

/// How the expressions of a rule combine into one match decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    /// Each expression reports its own matches.
    #[serde(rename = "Regular", alias = "Single")]
    Single,
    /// Matches when any expression matches.
    #[serde(rename = "OrMatch", alias = "Or")]
    Or,
    /// Matches only when every expression matches.
    #[serde(rename = "AndMatch", alias = "And")]
    And,
    /// Matches when the first expression matches and none of the others do.
    #[serde(rename = "NotMatch", alias = "Not")]
    Not,
}

impl MatchMode {
    pub const ALL: [MatchMode; 4] = [Self::Single, Self::Or, Self::And, Self::Not];

    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "regular" | "single" => Some(Self::Single),
            "ormatch" | "or" => Some(Self::Or),
            "andmatch" | "and" => Some(Self::And),
            "notmatch" | "not" => Some(Self::Not),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "Regular",
            Self::Or => "OrMatch",
            Self::And => "AndMatch",
            Self::Not => "NotMatch",
        }
    }

    /// Scanning-engine vocabulary for this mode.
    pub fn match_type(self) -> MatchType {
        match self {
            Self::Single => MatchType::Regular,
            Self::Or => MatchType::OrMatch,
            Self::And => MatchType::AndMatch,
            Self::Not => MatchType::NotMatch,
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
