use std::fmt;

use serde::{Deserialize, Serialize};

/// A single rejected field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every field error collected while validating one request, in check order.
///
/// Validators never stop at the first failure; callers always receive the
/// full list. An `Err(ValidationErrors)` is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (i, e) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}: {}", sep, e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Whether `value` is a finite whole number.
pub fn is_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// A trimmed copy of `value`, or `None` when nothing but whitespace remains.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_field() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "Name is required");
        errors.push("capacity", "Capacity is required");

        assert_eq!(
            errors.to_string(),
            "validation failed: name: Name is required; capacity: Capacity is required"
        );
    }

    #[test]
    fn serializes_as_a_plain_list() {
        let mut errors = ValidationErrors::new();
        errors.push("range", "Range is required");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "field": "range", "message": "Range is required" }])
        );
    }

    #[test]
    fn integer_check_rejects_fractions_and_non_finite() {
        assert!(is_integer(4.0));
        assert!(is_integer(-2.0));
        assert!(!is_integer(4.5));
        assert!(!is_integer(f64::NAN));
        assert!(!is_integer(f64::INFINITY));
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank("  Atlas "), Some("Atlas"));
        assert_eq!(non_blank("   "), None);
    }
}
