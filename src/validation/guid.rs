//! # GUID Validation
//!
//! Azure subscription, tenant and client identifiers are hyphenated GUIDs.

use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use regex::Regex;
use std::sync::LazyLock;

/// Anchored, case-insensitive GUID pattern
pub static GUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{8}-([0-9A-Fa-f]{4}-){3}[0-9A-Fa-f]{12}$")
        .expect("GUID regex is a valid literal")
});

/// Whether `value` is a hyphenated GUID
#[must_use]
pub fn is_guid(value: &str) -> bool {
    GUID_REGEX.is_match(value)
}

/// Validate a non-secret GUID field, echoing the value on failure
pub fn validate_guid(value: &str, path: &FieldPath) -> ErrorList {
    if value.is_empty() {
        return FieldError::required(path, "must be a valid GUID").into();
    }
    if is_guid(value) {
        return ErrorList::new();
    }
    FieldError::invalid(path, BadValue::of(&value), "must be a valid GUID").into()
}
