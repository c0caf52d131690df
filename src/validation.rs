use crate::error::{PicError, PicResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> PicResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(PicError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates an email address loosely: non-blank, one `@` with text on both sides.
pub fn email_address(value: &str) -> PicResult<String> {
    let trimmed = non_blank(value, "email")?;
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(trimmed)
        }
        _ => Err(PicError::InvalidField {
            field: "email".into(),
            value: trimmed,
        }),
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
