pub mod auth;
pub mod employee;
pub mod external;
pub mod hr;
pub mod leave;
pub mod project;
pub mod role;

use crate::error::ApiError;

pub(crate) fn normalize_email(value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.len() < 5 || !trimmed.contains('@') {
        return Err(ApiError::validation("Invalid email address"));
    }
    Ok(trimmed)
}

pub(crate) fn validate_length(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub(crate) fn validate_required(field: &str, value: &str, max: usize) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} is required", field)));
    }
    validate_length(field, trimmed, max)?;
    Ok(trimmed.to_string())
}
