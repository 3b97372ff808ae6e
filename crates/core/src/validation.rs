//! Field-level validation helpers shared by request DTOs.

use validator::{Validate, ValidateEmail};

use crate::error::CoreError;

/// Run `validator` derive rules and flatten any failures into one message.
///
/// Messages are sorted so the output is stable regardless of field order.
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), CoreError> {
    let Err(errors) = dto.validate() else {
        return Ok(());
    };

    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid ({})", e.code),
            })
        })
        .collect();
    messages.sort();
    messages.dedup();

    Err(CoreError::Validation(messages.join("; ")))
}

/// Reject empty or whitespace-only values.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Reject values longer than `max` characters.
pub fn validate_max_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Reject malformed email addresses.
pub fn validate_email(field: &str, value: &str) -> Result<(), CoreError> {
    if !value.validate_email() {
        return Err(CoreError::Validation(format!(
            "{field} must be a valid email address"
        )));
    }
    Ok(())
}

/// Trim and lowercase an email address for storage and lookups.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}
