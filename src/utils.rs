use chrono::{DateTime, Utc};

use crate::errors::AppError;

pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// True for `None`, empty and whitespace-only text.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Fails with a validation error carrying `message` when `value` is blank.
pub fn require_text(value: Option<&str>, message: &str) -> Result<(), AppError> {
    if is_blank(value) {
        return Err(AppError::validation(message));
    }
    Ok(())
}
