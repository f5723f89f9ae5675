//! Input validation primitives.
//!
//! Ergonomic helpers that replace verbose
//! `ok_or_else(|| Error::validation_invalid_argument(..))` chains.

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None, None))
    } else {
        Ok(trimmed)
    }
}

/// Require a count-like value to be strictly positive.
pub fn require_positive(value: usize, field: &str, message: &str) -> Result<usize> {
    if value == 0 {
        Err(Error::validation_invalid_argument(
            field,
            message,
            Some(value.to_string()),
            None,
        ))
    } else {
        Ok(value)
    }
}
