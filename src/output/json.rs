use crate::error::Result;
use crate::rules::{CustomRule, RejectedRule, RuleSet};

use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    rules: &'a [CustomRule],
    rejected: &'a [RejectedRule],
}

/// Render a rule set as a JSON report.
pub fn render(set: &RuleSet) -> Result<String> {
    let report = JsonReport {
        rules: set.rules(),
        rejected: set.rejected(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
