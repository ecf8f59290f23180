//! # Field Errors
//!
//! Field-scoped validation errors and the cumulative [`ErrorList`].

use super::path::FieldPath;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Literal used in place of sensitive values
pub const HIDDEN_VALUE: &str = "(hidden)";

/// Kind of a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ErrorKind {
    Required,
    Invalid,
    Forbidden,
    NotSupported,
    TooMany,
    Duplicate,
    InternalError,
}

impl ErrorKind {
    /// Human-readable description, as rendered in error messages
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Required => "Required value",
            ErrorKind::Invalid => "Invalid value",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotSupported => "Unsupported value",
            ErrorKind::TooMany => "Too many",
            ErrorKind::Duplicate => "Duplicate value",
            ErrorKind::InternalError => "Internal error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The offending value carried by an error
#[derive(Debug, Clone, PartialEq)]
pub enum BadValue {
    /// Sensitive value, rendered as `(hidden)`
    Hidden,
    /// Kind carries no value
    Omitted,
    Value(serde_json::Value),
}

impl BadValue {
    /// Wrap any serializable value
    ///
    /// Values that cannot be represented as JSON become their debug form.
    pub fn of<T: Serialize + fmt::Debug>(value: &T) -> Self {
        serde_json::to_value(value).map_or_else(
            |_| BadValue::Value(serde_json::Value::String(format!("{value:?}"))),
            BadValue::Value,
        )
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, BadValue::Hidden)
    }
}

impl fmt::Display for BadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadValue::Hidden => f.write_str(HIDDEN_VALUE),
            BadValue::Omitted => Ok(()),
            BadValue::Value(serde_json::Value::String(s)) => write!(f, "{s:?}"),
            BadValue::Value(v) => write!(f, "{v}"),
        }
    }
}

/// A single validation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{field}: Required value: {detail}")]
    Required { field: FieldPath, detail: String },

    #[error("{field}: Invalid value: {value}: {detail}")]
    Invalid {
        field: FieldPath,
        value: BadValue,
        detail: String,
    },

    #[error("{field}: Forbidden: {detail}")]
    Forbidden { field: FieldPath, detail: String },

    #[error("{field}: Unsupported value: {value}: supported values: {}", quote_all(.supported))]
    NotSupported {
        field: FieldPath,
        value: BadValue,
        supported: Vec<String>,
    },

    #[error("{field}: Too many: {actual}: must have at most {max} items")]
    TooMany {
        field: FieldPath,
        actual: usize,
        max: usize,
    },

    #[error("{field}: Duplicate value: {value}")]
    Duplicate { field: FieldPath, value: BadValue },

    #[error("{field}: Internal error: {detail}")]
    InternalError { field: FieldPath, detail: String },
}

fn quote_all(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl FieldError {
    pub fn required(field: &FieldPath, detail: impl Into<String>) -> Self {
        FieldError::Required {
            field: field.clone(),
            detail: detail.into(),
        }
    }

    pub fn invalid(field: &FieldPath, value: BadValue, detail: impl Into<String>) -> Self {
        FieldError::Invalid {
            field: field.clone(),
            value,
            detail: detail.into(),
        }
    }

    pub fn forbidden(field: &FieldPath, detail: impl Into<String>) -> Self {
        FieldError::Forbidden {
            field: field.clone(),
            detail: detail.into(),
        }
    }

    pub fn not_supported<S: AsRef<str>>(field: &FieldPath, value: BadValue, supported: &[S]) -> Self {
        FieldError::NotSupported {
            field: field.clone(),
            value,
            supported: supported.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    #[must_use]
    pub fn too_many(field: &FieldPath, actual: usize, max: usize) -> Self {
        FieldError::TooMany {
            field: field.clone(),
            actual,
            max,
        }
    }

    #[must_use]
    pub fn duplicate(field: &FieldPath, value: BadValue) -> Self {
        FieldError::Duplicate {
            field: field.clone(),
            value,
        }
    }

    pub fn internal(field: &FieldPath, detail: impl Into<String>) -> Self {
        FieldError::InternalError {
            field: field.clone(),
            detail: detail.into(),
        }
    }

    /// `Invalid` error for a field that may not change
    pub fn immutable(field: &FieldPath, value: BadValue) -> Self {
        Self::invalid(field, value, "field is immutable")
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::Required { .. } => ErrorKind::Required,
            FieldError::Invalid { .. } => ErrorKind::Invalid,
            FieldError::Forbidden { .. } => ErrorKind::Forbidden,
            FieldError::NotSupported { .. } => ErrorKind::NotSupported,
            FieldError::TooMany { .. } => ErrorKind::TooMany,
            FieldError::Duplicate { .. } => ErrorKind::Duplicate,
            FieldError::InternalError { .. } => ErrorKind::InternalError,
        }
    }

    #[must_use]
    pub fn field(&self) -> &FieldPath {
        match self {
            FieldError::Required { field, .. }
            | FieldError::Invalid { field, .. }
            | FieldError::Forbidden { field, .. }
            | FieldError::NotSupported { field, .. }
            | FieldError::TooMany { field, .. }
            | FieldError::Duplicate { field, .. }
            | FieldError::InternalError { field, .. } => field,
        }
    }

    /// Offending value, `Omitted` for kinds that carry none
    #[must_use]
    pub fn bad_value(&self) -> BadValue {
        match self {
            FieldError::Invalid { value, .. }
            | FieldError::NotSupported { value, .. }
            | FieldError::Duplicate { value, .. } => value.clone(),
            FieldError::TooMany { actual, .. } => BadValue::of(actual),
            FieldError::Required { .. }
            | FieldError::Forbidden { .. }
            | FieldError::InternalError { .. } => BadValue::Omitted,
        }
    }

    /// Detail message
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            FieldError::Required { detail, .. }
            | FieldError::Invalid { detail, .. }
            | FieldError::Forbidden { detail, .. }
            | FieldError::InternalError { detail, .. } => detail.clone(),
            FieldError::NotSupported { supported, .. } => {
                format!("supported values: {}", quote_all(supported))
            }
            FieldError::TooMany { max, .. } => format!("must have at most {max} items"),
            FieldError::Duplicate { .. } => String::new(),
        }
    }

    /// Accepted values, only populated for `NotSupported`
    #[must_use]
    pub fn supported_values(&self) -> &[String] {
        match self {
            FieldError::NotSupported { supported, .. } => supported,
            _ => &[],
        }
    }
}

/// Ordered, cumulative list of validation errors
///
/// Order reflects discovery order. An empty list means the input is valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Append another list, preserving order
    pub fn append(&mut self, mut other: ErrorList) {
        self.0.append(&mut other.0);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Errors of the given kind
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(move |e| e.kind() == kind)
    }

    /// `(kind, rendered path)` pairs, sorted
    #[must_use]
    pub fn signature(&self) -> Vec<(ErrorKind, String)> {
        let mut pairs: Vec<_> = self
            .0
            .iter()
            .map(|e| (e.kind(), e.field().to_string()))
            .collect();
        pairs.sort();
        pairs
    }

    /// `Ok(())` when empty, the full list otherwise
    ///
    /// # Errors
    ///
    /// Returns `self` when it contains at least one error.
    pub fn into_result(self) -> Result<(), ErrorList> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => Ok(()),
            [single] => write!(f, "{single}"),
            many => {
                write!(f, "[")?;
                for (i, error) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{error}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl std::error::Error for ErrorList {}

impl From<FieldError> for ErrorList {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl From<Vec<FieldError>> for ErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<T: IntoIterator<Item = FieldError>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<T: IntoIterator<Item = FieldError>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
