use std::fmt;

use crate::models::ValidationErrors;

/// The kind of record a lookup was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Rocket,
    Launch,
    Customer,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rocket => "Rocket",
            Self::Launch => "Launch",
            Self::Customer => "Customer",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of an operation that looks up an existing record before changing it.
///
/// The two cases are kept apart so the HTTP layer can answer 400 for a
/// rejected request and 404 for an unknown key.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{0} not found")]
    NotFound(ResourceKind),
}

impl ServiceError {
    /// The field errors, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::NotFound(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_resource() {
        assert_eq!(
            ServiceError::NotFound(ResourceKind::Customer).to_string(),
            "Customer not found"
        );
    }

    #[test]
    fn validation_displays_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.push("price", "Price is required");
        let err = ServiceError::from(errors);

        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "validation failed: price: Price is required");
        assert_eq!(err.validation_errors().map(|e| e.len()), Some(1));
    }
}
