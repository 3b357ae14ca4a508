use serde::Serialize;
use serde_json::Value;

use super::custom_rule::rule_label;
use super::{CustomRule, Language, ValidationErrors};
use crate::engine::TextRule;
use crate::error::Result;

/// A rule that failed validation while loading a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRule {
    /// Position in the source document.
    pub index: usize,
    pub id: Option<String>,
    pub errors: ValidationErrors,
}

/// Validated custom rules, in declaration order, plus the ones rejected.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CustomRule>,
    rejected: Vec<RejectedRule>,
}

impl RuleSet {
    /// Parse a JSON array of rules.
    ///
    /// Each element is validated on its own; invalid rules, including ones
    /// with wrong field types, are logged and kept aside and never block the
    /// valid ones. Only a malformed document or a non-array top level fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        let mut set = Self::default();
        for (index, value) in values.iter().enumerate() {
            set.push(index, rule_label(value), CustomRule::from_value(value));
        }
        Ok(set)
    }

    fn push(
        &mut self,
        index: usize,
        id: Option<String>,
        parsed: std::result::Result<CustomRule, ValidationErrors>,
    ) {
        match parsed {
            Ok(rule) => self.rules.push(rule),
            Err(errors) => {
                tracing::warn!(
                    index,
                    rule_id = id.as_deref().unwrap_or("-"),
                    errors = %errors,
                    "invalid custom rule, skipping"
                );
                self.rejected.push(RejectedRule { index, id, errors });
            }
        }
    }

    pub fn rules(&self) -> &[CustomRule] {
        &self.rules
    }

    pub fn rejected(&self) -> &[RejectedRule] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Engine rules targeting `language`, in declaration order.
    pub fn for_language(&self, language: Language) -> Vec<TextRule> {
        self.rules
            .iter()
            .filter(|r| r.language() == language)
            .map(CustomRule::to_text_rule)
            .collect()
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&CustomRule) -> bool) {
        self.rules.retain(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MatchType;
    use pretty_assertions::assert_eq;

    const RULES: &str = r#"[
        {
            "id": "0c9f3c1e-8e0a-4b59-9a59-3b7d0b1f6a01",
            "name": "Hardcoded password",
            "language": "Leaks",
            "severity": "HIGH",
            "confidence": "MEDIUM",
            "type": "AndMatch",
            "expressions": ["^password=", "[0-9]{4,}"]
        },
        {
            "id": "not-a-uuid",
            "language": "COBOL",
            "severity": "HIGH",
            "confidence": "LOW",
            "type": "Regular",
            "expressions": ["x"]
        },
        {
            "id": "7d1e2a44-51c3-4a5e-8f0f-2b8c9d6e7f10",
            "name": "Autoindex on",
            "language": "Nginx",
            "severity": "LOW",
            "confidence": "HIGH",
            "type": "Regular",
            "expressions": ["autoindex\\s+on", "(broken"]
        },
        {
            "id": "a4b5c6d7-1111-4222-8333-444455556666",
            "name": "Console log",
            "language": "JavaScript",
            "severity": "INFO",
            "confidence": "LOW",
            "type": "NotMatch",
            "expressions": ["console\\.log", "eslint-disable"]
        }
    ]"#;

    #[test]
    fn invalid_rule_does_not_block_others() {
        let set = RuleSet::from_json(RULES).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.rejected().len(), 1);

        let rejected = &set.rejected()[0];
        assert_eq!(rejected.index, 1);
        assert_eq!(rejected.id.as_deref(), Some("not-a-uuid"));
        assert!(rejected.errors.contains("id"));
        assert!(rejected.errors.contains("language"));
    }

    #[test]
    fn wrong_field_types_reject_only_that_rule() {
        let set = RuleSet::from_json(
            r#"[
                {"id": "0c9f3c1e-8e0a-4b59-9a59-3b7d0b1f6a01", "language": "Leaks",
                 "severity": "HIGH", "confidence": "HIGH", "type": "Regular",
                 "expressions": ["AKIA[0-9A-Z]{16}"]},
                {"id": "7d1e2a44-51c3-4a5e-8f0f-2b8c9d6e7f10", "name": 5, "language": "Leaks",
                 "severity": 3, "confidence": "LOW", "type": "Regular", "expressions": "abc"},
                "not a rule"
            ]"#,
        )
        .unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.rejected().len(), 2);

        let mistyped = &set.rejected()[0];
        assert_eq!(mistyped.index, 1);
        assert_eq!(
            mistyped.id.as_deref(),
            Some("7d1e2a44-51c3-4a5e-8f0f-2b8c9d6e7f10")
        );
        let fields: Vec<&str> = mistyped.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "severity", "expressions"]);
        assert_eq!(
            mistyped.errors.get("severity").unwrap().message,
            "must be a string"
        );
        assert_eq!(
            mistyped.errors.get("expressions").unwrap().message,
            "must be a list of strings"
        );

        let not_object = &set.rejected()[1];
        assert_eq!(not_object.index, 2);
        assert!(not_object.id.is_none());
        assert!(not_object.errors.contains("rule"));
    }

    #[test]
    fn groups_by_language() {
        let set = RuleSet::from_json(RULES).unwrap();

        let nginx = set.for_language(Language::Nginx);
        assert_eq!(nginx.len(), 1);
        assert_eq!(nginx[0].match_type, MatchType::Regular);
        assert_eq!(nginx[0].expressions.len(), 1);

        let js = set.for_language(Language::Javascript);
        assert_eq!(js[0].match_type, MatchType::NotMatch);

        assert!(set.for_language(Language::Kotlin).is_empty());
    }

    #[test]
    fn rejects_non_array_document() {
        assert!(RuleSet::from_json(r#"{"id": "x"}"#).is_err());
    }
}
