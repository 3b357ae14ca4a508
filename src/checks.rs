//! Result buckets produced by an external IaC checker.
//!
//! The checker reports one JSON document with four lists; every check lands
//! in exactly one of them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub result: CheckStatus,
}

/// One check the external checker ran against one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub check_id: String,
    #[serde(default)]
    pub check_name: String,
    pub check_result: CheckOutcome,
    #[serde(default)]
    pub file_path: String,
    /// First and last line of the offending block.
    #[serde(default)]
    pub file_line_range: Vec<u32>,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub guideline: Option<String>,
}

/// The checker's output document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub passed_checks: Vec<Check>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub failed_checks: Vec<Check>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skipped_checks: Vec<Check>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parsing_errors: Vec<Check>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Check>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Check>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CheckResult {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every check, bucket by bucket in document order.
    pub fn all_checks(&self) -> impl Iterator<Item = &Check> {
        self.passed_checks
            .iter()
            .chain(&self.failed_checks)
            .chain(&self.skipped_checks)
            .chain(&self.parsing_errors)
    }

    pub fn total(&self) -> usize {
        self.passed_checks.len()
            + self.failed_checks.len()
            + self.skipped_checks.len()
            + self.parsing_errors.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OUTPUT: &str = r#"{
        "passed_checks": [
            {
                "check_id": "CKV_AWS_20",
                "check_name": "S3 Bucket has an ACL defined which allows public READ access.",
                "check_result": {"result": "PASSED"},
                "file_path": "/main.tf",
                "file_line_range": [1, 8],
                "resource": "aws_s3_bucket.data"
            }
        ],
        "failed_checks": [
            {
                "check_id": "CKV_AWS_19",
                "check_name": "Ensure all data stored in the S3 bucket is securely encrypted at rest",
                "check_result": {"result": "FAILED"},
                "file_path": "/main.tf",
                "file_line_range": [1, 8],
                "resource": "aws_s3_bucket.data",
                "guideline": "https://docs.example.com/s3-encryption"
            }
        ],
        "skipped_checks": [],
        "parsing_errors": null
    }"#;

    #[test]
    fn parses_all_buckets() {
        let result = CheckResult::from_json(OUTPUT).unwrap();
        assert_eq!(result.total(), 2);
        assert!(result.has_failures());
        assert!(result.parsing_errors.is_empty());

        let failed = &result.failed_checks[0];
        assert_eq!(failed.check_id, "CKV_AWS_19");
        assert_eq!(failed.check_result.result, CheckStatus::Failed);
        assert_eq!(failed.file_line_range, vec![1, 8]);
        assert!(failed.guideline.is_some());
    }

    #[test]
    fn all_checks_visits_buckets_in_order() {
        let result = CheckResult::from_json(OUTPUT).unwrap();
        let ids: Vec<&str> = result.all_checks().map(|c| c.check_id.as_str()).collect();
        assert_eq!(ids, vec!["CKV_AWS_20", "CKV_AWS_19"]);
    }

    #[test]
    fn missing_buckets_default_to_empty() {
        let result = CheckResult::from_json("{}").unwrap();
        assert_eq!(result, CheckResult::default());
        assert!(!result.has_failures());
    }

    #[test]
    fn unrecognized_status_is_unknown() {
        let check: Check = serde_json::from_str(
            r#"{"check_id": "CKV_X", "check_result": {"result": "SOFT_FAIL"}}"#,
        )
        .unwrap();
        assert_eq!(check.check_result.result, CheckStatus::Unknown);
    }
}
