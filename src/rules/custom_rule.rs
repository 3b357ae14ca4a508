use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{Confidence, Language, MatchMode, Severity, ValidationErrors, CUSTOM_RULE_LANGUAGES};
use crate::engine::{MatchType, TextRule};
use crate::error::{PatternCompileError, Result};

/// A custom rule exactly as the user wrote it.
///
/// Every field is optional text so that a single validation pass can report
/// all problems at once instead of stopping at the first bad enum value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCustomRule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default, rename = "type")]
    pub match_mode: Option<String>,
    #[serde(default)]
    pub expressions: Option<Vec<String>>,
}

impl RawCustomRule {
    /// Read a rule from an untyped JSON object.
    ///
    /// A field holding the wrong JSON type is left unset and reported in the
    /// returned errors, so one mistyped value never fails a whole document.
    pub fn from_json_object(object: &Map<String, Value>) -> (Self, ValidationErrors) {
        let mut mistyped = ValidationErrors::default();
        let raw = Self {
            id: string_field(object, "id", &mut mistyped),
            name: string_field(object, "name", &mut mistyped),
            description: string_field(object, "description", &mut mistyped),
            language: string_field(object, "language", &mut mistyped),
            severity: string_field(object, "severity", &mut mistyped),
            confidence: string_field(object, "confidence", &mut mistyped),
            match_mode: string_field(object, "type", &mut mistyped),
            expressions: string_list_field(object, "expressions", &mut mistyped),
        };
        (raw, mistyped)
    }

    /// Check every field constraint and report all violations together.
    ///
    /// Expressions are not inspected; a bad pattern is dropped later by
    /// [`CustomRule::expressions`].
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.parse().map(|_| ())
    }

    /// Resolve the declared combination mode without validating the rule.
    ///
    /// A missing or unrecognized mode resolves to [`MatchType::Regular`].
    pub fn match_type(&self) -> MatchType {
        match self.match_mode.as_deref().and_then(MatchMode::from_str_lenient) {
            Some(mode) => mode.match_type(),
            None => {
                tracing::debug!(
                    rule_id = self.id.as_deref().unwrap_or("-"),
                    match_mode = self.match_mode.as_deref().unwrap_or("-"),
                    "unrecognized match mode, using regular"
                );
                MatchType::Regular
            }
        }
    }

    fn parse(&self) -> std::result::Result<CustomRule, ValidationErrors> {
        self.parse_with(&ValidationErrors::default())
    }

    /// Validate, merging `mistyped` field errors in declaration order.
    fn parse_with(
        &self,
        mistyped: &ValidationErrors,
    ) -> std::result::Result<CustomRule, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let id = required(&mut errors, mistyped, "id", self.id.as_deref(), parse_id);
        carry(&mut errors, mistyped, "name");
        carry(&mut errors, mistyped, "description");
        let language = required(&mut errors, mistyped, "language", self.language.as_deref(), |s| {
            Language::from_str_lenient(s)
                .filter(|lang| lang.is_custom_rule_target())
                .ok_or_else(|| one_of(CUSTOM_RULE_LANGUAGES.iter().map(|l| l.as_str())))
        });
        let severity = required(&mut errors, mistyped, "severity", self.severity.as_deref(), |s| {
            Severity::from_str_lenient(s)
                .ok_or_else(|| one_of(Severity::ALL.iter().map(|s| s.as_str())))
        });
        let confidence =
            required(&mut errors, mistyped, "confidence", self.confidence.as_deref(), |s| {
                Confidence::from_str_lenient(s)
                    .ok_or_else(|| one_of(Confidence::ALL.iter().map(|c| c.as_str())))
            });
        let match_mode = required(&mut errors, mistyped, "type", self.match_mode.as_deref(), |s| {
            MatchMode::from_str_lenient(s)
                .ok_or_else(|| one_of(MatchMode::ALL.iter().map(|m| m.as_str())))
        });
        carry(&mut errors, mistyped, "expressions");

        match (id, language, severity, confidence, match_mode) {
            (Some(id), Some(language), Some(severity), Some(confidence), Some(match_mode))
                if errors.is_empty() =>
            {
                Ok(CustomRule {
                    id,
                    name: self.name.clone().unwrap_or_default(),
                    description: self.description.clone().unwrap_or_default(),
                    language,
                    severity,
                    confidence,
                    match_mode,
                    expressions: self.expressions.clone().unwrap_or_default(),
                })
            }
            _ => Err(errors),
        }
    }
}

fn required<T>(
    errors: &mut ValidationErrors,
    mistyped: &ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    parse: impl FnOnce(&str) -> std::result::Result<T, String>,
) -> Option<T> {
    if carry(errors, mistyped, field) {
        return None;
    }
    match value.map(str::trim) {
        None | Some("") => {
            errors.push(field, "cannot be blank");
            None
        }
        Some(raw) => match parse(raw) {
            Ok(value) => Some(value),
            Err(message) => {
                errors.push(field, message);
                None
            }
        },
    }
}

/// Copy the type error recorded for `field`, if any.
fn carry(errors: &mut ValidationErrors, mistyped: &ValidationErrors, field: &'static str) -> bool {
    match mistyped.get(field) {
        Some(err) => {
            errors.push(field, err.message.clone());
            true
        }
        None => false,
    }
}

fn string_field(
    object: &Map<String, Value>,
    field: &'static str,
    mistyped: &mut ValidationErrors,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            mistyped.push(field, "must be a string");
            None
        }
    }
}

fn string_list_field(
    object: &Map<String, Value>,
    field: &'static str,
    mistyped: &mut ValidationErrors,
) -> Option<Vec<String>> {
    let items = match object.get(field) {
        None | Some(Value::Null) => return None,
        Some(Value::Array(items)) => items,
        Some(_) => {
            mistyped.push(field, "must be a list of strings");
            return None;
        }
    };
    let strings: Option<Vec<String>> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect();
    if strings.is_none() {
        mistyped.push(field, "must be a list of strings");
    }
    strings
}

fn parse_id(raw: &str) -> std::result::Result<Uuid, String> {
    let id = Uuid::parse_str(raw).map_err(|e| format!("must be a valid UUID ({e})"))?;
    if id.is_nil() {
        return Err("cannot be blank".into());
    }
    Ok(id)
}

fn one_of<'a>(allowed: impl Iterator<Item = &'a str>) -> String {
    format!("must be one of {}", allowed.collect::<Vec<_>>().join(", "))
}

/// The `id` of a rule value, when it is a string.
pub(crate) fn rule_label(value: &Value) -> Option<String> {
    value.get("id").and_then(Value::as_str).map(str::to_string)
}

/// A validated custom rule. Only obtainable through [`TryFrom<RawCustomRule>`]
/// (or deserialization, which goes through the same path) and read-only after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCustomRule")]
pub struct CustomRule {
    id: Uuid,
    name: String,
    description: String,
    language: Language,
    severity: Severity,
    confidence: Confidence,
    #[serde(rename = "type")]
    match_mode: MatchMode,
    expressions: Vec<String>,
}

impl TryFrom<RawCustomRule> for CustomRule {
    type Error = ValidationErrors;

    fn try_from(raw: RawCustomRule) -> std::result::Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<&CustomRule> for RawCustomRule {
    fn from(rule: &CustomRule) -> Self {
        Self {
            id: Some(rule.id.to_string()),
            name: Some(rule.name.clone()),
            description: Some(rule.description.clone()),
            language: Some(rule.language.as_str().into()),
            severity: Some(rule.severity.as_str().into()),
            confidence: Some(rule.confidence.as_str().into()),
            match_mode: Some(rule.match_mode.as_str().into()),
            expressions: Some(rule.expressions.clone()),
        }
    }
}

impl CustomRule {
    /// Parse and validate a single rule from JSON.
    ///
    /// Only malformed JSON is a [`RuleError::Json`](crate::error::RuleError);
    /// wrong field types are validation errors on the offending fields.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value).map_err(|errors| crate::error::RuleError::Validation {
            rule: rule_label(&value).unwrap_or_else(|| "<no id>".into()),
            errors,
        })
    }

    /// Validate one rule held as an untyped JSON value.
    pub fn from_value(value: &Value) -> std::result::Result<Self, ValidationErrors> {
        let Some(object) = value.as_object() else {
            let mut errors = ValidationErrors::default();
            errors.push("rule", "must be a JSON object");
            return Err(errors);
        };
        let (raw, mistyped) = RawCustomRule::from_json_object(object);
        raw.parse_with(&mistyped)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Expression sources as declared, including ones that fail to compile.
    pub fn raw_expressions(&self) -> &[String] {
        &self.expressions
    }

    pub fn match_type(&self) -> MatchType {
        self.match_mode.match_type()
    }

    /// Compile every expression, logging and skipping the ones that fail.
    ///
    /// Recompiled on each call.
    pub fn expressions(&self) -> Vec<Regex> {
        compile_expressions(self.expressions.iter().map(String::as_str), |err| {
            tracing::error!(
                rule_id = %self.id,
                index = err.index,
                expression = %err.expression,
                error = %err.source,
                "failed to compile custom rule regex, skipping"
            );
        })
    }

    /// Build the engine input for this rule.
    pub fn to_text_rule(&self) -> TextRule {
        TextRule {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            language: self.language,
            severity: self.severity,
            confidence: self.confidence,
            match_type: self.match_type(),
            expressions: self.expressions(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl std::fmt::Display for CustomRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

/// Compile expressions in order, handing each failure to `on_error` once.
///
/// Never aborts: the result holds every expression that compiled, in
/// declaration order, and may be empty.
pub fn compile_expressions<'a, I, F>(expressions: I, mut on_error: F) -> Vec<Regex>
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(PatternCompileError),
{
    let mut compiled = Vec::new();
    for (index, expression) in expressions.into_iter().enumerate() {
        match Regex::new(expression) {
            Ok(regex) => compiled.push(regex),
            Err(source) => on_error(PatternCompileError {
                index,
                expression: expression.to_string(),
                source,
            }),
        }
    }
    compiled
}
