use crate::error::AppError;

/// Message shown when a required field is blank or whitespace-only.
pub const ERR_NON_EMPTY: &str = "Value cannot be empty.";

/// Transmission values the catalog accepts.
pub const TRANSMISSIONS: [&str; 2] = ["manual", "automatic"];

/// Rejects blank or whitespace-only values for a required field. The field
/// name is included so the admin form can point at the offending input.
pub fn validate_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field}: {ERR_NON_EMPTY}")));
    }
    Ok(())
}

/// Rejects transmission values outside the catalog's categorical set.
pub fn validate_transmission(value: &str) -> Result<(), AppError> {
    if !TRANSMISSIONS.contains(&value) {
        return Err(AppError::Validation(format!(
            "transmission: expected one of {TRANSMISSIONS:?}, got {value:?}."
        )));
    }
    Ok(())
}
