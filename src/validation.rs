use crate::error::{ContactsError, ContactsResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> ContactsResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(ContactsError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates that a set/vec is non-empty.
pub fn non_empty_set<T>(value: &[T], field: &str) -> ContactsResult<()> {
    if value.is_empty() {
        Err(ContactsError::EmptySet {
            field: field.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Validates an email address: one '@', non-empty local part, and a dotted
/// domain with no empty labels or whitespace. Returns the trimmed address.
pub fn email(value: &str, field: &str) -> ContactsResult<String> {
    let trimmed = non_blank(value, field)?;
    let invalid = || ContactsError::InvalidFormat {
        field: field.to_string(),
        value: trimmed.clone(),
    };

    if trimmed.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }
    Ok(trimmed)
}

/// Validates an http(s) URL with a non-empty host. Returns the trimmed URL.
pub fn web_url(value: &str, field: &str) -> ContactsResult<String> {
    let trimmed = non_blank(value, field)?;
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));

    match rest {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') && !rest.contains(' ') => {
            Ok(trimmed)
        }
        _ => Err(ContactsError::InvalidFormat {
            field: field.to_string(),
            value: trimmed,
        }),
    }
}
