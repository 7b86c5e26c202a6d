//! Validation for books and list names

use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Severity of a validation error
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// A validation error or warning
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub severity: ValidationSeverity,
}

/// Trim a candidate list name, rejecting empty results.
pub fn normalized_list_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validate a book and return errors/warnings
pub fn validate_book(book: &Book) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if book.id.trim().is_empty() {
        errors.push(ValidationError {
            field: "id".to_string(),
            message: "Work key is required".to_string(),
            severity: ValidationSeverity::Error,
        });
    }

    if book.title.trim().is_empty() {
        errors.push(ValidationError {
            field: "title".to_string(),
            message: "Title is required".to_string(),
            severity: ValidationSeverity::Error,
        });
    }

    if book.authors.is_empty() {
        errors.push(ValidationError {
            field: "authors".to_string(),
            message: "Authors are recommended".to_string(),
            severity: ValidationSeverity::Warning,
        });
    }

    errors
}

/// Check if a book is valid (no errors)
pub fn is_valid(book: &Book) -> bool {
    validate_book(book)
        .iter()
        .all(|e| !matches!(e.severity, ValidationSeverity::Error))
}
