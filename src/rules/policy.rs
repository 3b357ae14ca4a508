use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RuleSet, Severity};

/// Which loaded rules reach the scanning engine, from `.ruleguard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulePolicy {
    /// Rule IDs to drop entirely.
    #[serde(default)]
    pub ignore_rules: HashSet<Uuid>,
    /// Drop rules below this severity.
    #[serde(default)]
    pub min_severity: Option<Severity>,
}

impl RulePolicy {
    pub fn allows(&self, id: Uuid, severity: Severity) -> bool {
        if self.ignore_rules.contains(&id) {
            return false;
        }
        self.min_severity.map_or(true, |min| severity >= min)
    }

    /// Remove the rules this policy does not allow.
    pub fn apply(&self, mut set: RuleSet) -> RuleSet {
        let before = set.len();
        set.retain(|rule| self.allows(rule.id(), rule.severity()));
        let dropped = before - set.len();
        if dropped > 0 {
            tracing::debug!(dropped, "custom rules filtered by policy");
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IGNORED: &str = "11111111-2222-4333-8444-555555555555";

    fn make_set() -> RuleSet {
        RuleSet::from_json(&format!(
            r#"[
                {{"id": "{IGNORED}", "language": "Java", "severity": "CRITICAL",
                  "confidence": "HIGH", "type": "Regular", "expressions": ["Runtime\\.exec"]}},
                {{"id": "66666666-7777-4888-9999-aaaaaaaaaaaa", "language": "Java", "severity": "LOW",
                  "confidence": "HIGH", "type": "Regular", "expressions": ["printStackTrace"]}},
                {{"id": "bbbbbbbb-cccc-4ddd-8eee-ffffffffffff", "language": "Kotlin", "severity": "HIGH",
                  "confidence": "MEDIUM", "type": "OrMatch", "expressions": ["MD5", "SHA1"]}}
            ]"#
        ))
        .unwrap()
    }

    #[test]
    fn default_policy_keeps_everything() {
        let set = RulePolicy::default().apply(make_set());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn ignore_rule_removes_rule() {
        let mut policy = RulePolicy::default();
        policy.ignore_rules.insert(IGNORED.parse().unwrap());
        let set = policy.apply(make_set());
        assert_eq!(set.len(), 2);
        assert!(set.rules().iter().all(|r| r.id().to_string() != IGNORED));
    }

    #[test]
    fn min_severity_drops_lower_rules() {
        let policy = RulePolicy {
            min_severity: Some(Severity::Medium),
            ..Default::default()
        };
        let set = policy.apply(make_set());
        assert_eq!(set.len(), 2);
        assert!(set.rules().iter().all(|r| r.severity() >= Severity::Medium));
    }
}
