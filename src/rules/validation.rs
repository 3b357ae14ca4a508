use serde::Serialize;

/// One violated constraint on one rule field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every constraint a rule violates, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Whether `field` has at least one error.
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// First error recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_all_fields() {
        let mut errors = ValidationErrors::default();
        errors.push("id", "cannot be blank");
        errors.push("language", "must be a valid value");
        assert_eq!(
            errors.to_string(),
            "id: cannot be blank; language: must be a valid value"
        );
        assert!(errors.contains("language"));
        assert!(!errors.contains("severity"));
    }

    #[test]
    fn get_returns_first_error_for_field() {
        let mut errors = ValidationErrors::default();
        errors.push("severity", "must be a string");
        errors.push("severity", "cannot be blank");
        assert_eq!(errors.get("severity").unwrap().message, "must be a string");
        assert!(errors.get("id").is_none());
    }
}
