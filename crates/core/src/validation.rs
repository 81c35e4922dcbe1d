//! Field validation for user-submitted data.
//!
//! Every function returns `Err` with a human-readable message suitable for a
//! 400 response body.

use std::sync::LazyLock;

use regex::Regex;

/// Something, an `@`, something, a dot, something. No whitespace anywhere.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Lowest accepted age (inclusive).
pub const MIN_AGE: i32 = 1;

/// Highest accepted age (inclusive).
pub const MAX_AGE: i32 = 150;

/// Validate the format of an email address.
pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

/// Validate an age against [`MIN_AGE`]..=[`MAX_AGE`].
pub fn validate_age(age: i32) -> Result<(), String> {
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(format!("Age must be between {MIN_AGE} and {MAX_AGE}"))
    }
}

/// Collect the names of required fields that are missing or blank.
///
/// Returns `Err("Missing required fields: a, b")` naming every offender.
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Result<(), String> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing required fields: {}", missing.join(", ")))
    }
}
