use crate::rules::RuleSet;

/// Render rules as a table, followed by any rejected rules and their errors.
pub fn render(set: &RuleSet) -> String {
    let mut output = String::new();

    if set.is_empty() && set.rejected().is_empty() {
        output.push_str("\n  No custom rules loaded.\n\n");
        return output;
    }

    output.push_str(&format!(
        "{:<38} {:<24} {:<11} {:<9} {:<7} {:<9} EXPR\n",
        "ID", "NAME", "LANGUAGE", "SEVERITY", "CONF", "TYPE"
    ));
    output.push_str(&"-".repeat(108));
    output.push('\n');

    for rule in set.rules() {
        output.push_str(&format!(
            "{:<38} {:<24} {:<11} {:<9} {:<7} {:<9} {}\n",
            rule.id().to_string(),
            truncate(rule.name(), 24),
            rule.language().as_str(),
            rule.severity().as_str(),
            rule.confidence().as_str(),
            rule.match_mode().as_str(),
            rule.raw_expressions().len(),
        ));
    }

    if !set.rejected().is_empty() {
        output.push_str(&format!("\n  {} rule(s) rejected:\n\n", set.rejected().len()));
        for rejected in set.rejected() {
            output.push_str(&format!(
                "  #{} {}\n",
                rejected.index,
                rejected.id.as_deref().unwrap_or("<no id>")
            ));
            for err in &rejected.errors {
                output.push_str(&format!("           {}: {}\n", err.field, err.message));
            }
        }
        output.push('\n');
    }

    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut short: String = s.chars().take(max - 1).collect();
        short.push('…');
        short
    }
}
