use crate::utils::error::{InventoryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Trims `value` and rejects it when nothing is left.
///
/// Domain-level check: failures are `ValidationError`s carrying `message`.
pub fn normalize_text(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::validation(message));
    }
    Ok(trimmed.to_string())
}

/// Checks the length of `value` in characters, not bytes.
pub fn validate_char_length(value: &str, min: usize, max: usize, message: &str) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(InventoryError::validation(format!(
            "{} (got {} characters)",
            message, len
        )));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
