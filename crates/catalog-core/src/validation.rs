//! Validation utilities.

use crate::{CatalogError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `CatalogError` on failure.
    fn validate_request(&self) -> Result<(), CatalogError> {
        self.validate().map_err(validation_errors_to_catalog_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors, sorted by field.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `CatalogError`.
#[must_use]
pub fn validation_errors_to_catalog_error(errors: ValidationErrors) -> CatalogError {
    CatalogError::InvalidFields(field_errors(&errors))
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a rating is a finite number.
    pub fn finite(value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::new("finite"));
        }
        Ok(())
    }
}
