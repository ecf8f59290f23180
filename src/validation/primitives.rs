//! # Primitive Validators
//!
//! Small composable validators over a single value. Each is a first-class
//! function `(value, field path) -> ErrorList`; [`all_of`] folds a list of
//! them into one validator that concatenates their outputs.
//!
//! Empty strings pass [`matches`], [`min_length`], [`max_length`] and
//! [`one_of`] vacuously. Combine with [`not_empty`] when emptiness must be
//! rejected.

use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use regex::Regex;
use std::sync::LazyLock;

/// A boxed validator over values of type `T`
pub type ValidateFn<T> = Box<dyn Fn(&T, &FieldPath) -> ErrorList + Send + Sync>;

// Basic URL validation: must start with http:// or https://
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("URL regex is a valid literal")
});

/// Combine validators over the same value into one
///
/// Every validator runs; errors are concatenated in the given order.
pub fn all_of<T: ?Sized + 'static>(validators: Vec<ValidateFn<T>>) -> ValidateFn<T> {
    Box::new(move |value, path| {
        let mut errors = ErrorList::new();
        for validator in &validators {
            errors.append(validator(value, path));
        }
        errors
    })
}

/// Reject empty values with `Required`
#[must_use]
pub fn not_empty() -> ValidateFn<str> {
    Box::new(|value, path| {
        if value.is_empty() {
            FieldError::required(path, "cannot be empty").into()
        } else {
            ErrorList::new()
        }
    })
}

/// Minimum length in characters
#[must_use]
pub fn min_length(min: usize) -> ValidateFn<str> {
    Box::new(move |value, path| {
        let len = value.chars().count();
        if value.is_empty() || len >= min {
            return ErrorList::new();
        }
        FieldError::invalid(
            path,
            BadValue::of(&value),
            format!("must be at least {min} characters long (got {len})"),
        )
        .into()
    })
}

/// Maximum length in characters
#[must_use]
pub fn max_length(max: usize) -> ValidateFn<str> {
    Box::new(move |value, path| {
        let len = value.chars().count();
        if len <= max {
            return ErrorList::new();
        }
        FieldError::invalid(
            path,
            BadValue::of(&value),
            format!("must not be more than {max} characters long (got {len})"),
        )
        .into()
    })
}

/// Value must match `regex`; `detail` explains the expected shape
#[must_use]
pub fn matches(regex: &'static Regex, detail: &'static str) -> ValidateFn<str> {
    Box::new(move |value, path| {
        if value.is_empty() || regex.is_match(value) {
            return ErrorList::new();
        }
        FieldError::invalid(path, BadValue::of(&value), detail).into()
    })
}

/// Value must not end with `suffix`
#[must_use]
pub fn not_ending_with(suffix: &'static str) -> ValidateFn<str> {
    Box::new(move |value, path| {
        if value.ends_with(suffix) {
            FieldError::invalid(
                path,
                BadValue::of(&value),
                format!("must not end with '{suffix}'"),
            )
            .into()
        } else {
            ErrorList::new()
        }
    })
}

/// Enum membership, reported as `NotSupported` with the accepted values
#[must_use]
pub fn one_of(allowed: &'static [&'static str]) -> ValidateFn<str> {
    Box::new(move |value, path| validate_one_of(value, allowed, path))
}

/// Enum membership as a plain function
pub fn validate_one_of<S: AsRef<str>>(value: &str, allowed: &[S], path: &FieldPath) -> ErrorList {
    if value.is_empty() || allowed.iter().any(|a| a.as_ref() == value) {
        return ErrorList::new();
    }
    FieldError::not_supported(path, BadValue::of(&value), allowed).into()
}

/// URL must be absolute `http` or `https`
#[must_use]
pub fn url() -> ValidateFn<str> {
    Box::new(validate_url)
}

/// Validate URL format
pub fn validate_url(value: &str, path: &FieldPath) -> ErrorList {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldError::required(path, "cannot be empty").into();
    }
    if URL_REGEX.is_match(trimmed) {
        return ErrorList::new();
    }
    FieldError::invalid(
        path,
        BadValue::of(&value),
        "must be a valid URL starting with http:// or https://",
    )
    .into()
}

/// Non-empty check for optional string fields
pub fn validate_not_empty(value: &str, path: &FieldPath) -> ErrorList {
    not_empty()(value, path)
}
