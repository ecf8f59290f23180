//! Interpreter for [`CredentialMapping`] schemas over Kubernetes secrets.
//!
//! Phases run in a fixed order and never short-circuit each other:
//! required presence, format, unknown keys, allowed values, key pairs and,
//! on update, immutability. Secret values are never echoed; every error
//! carries [`BadValue::Hidden`] where a value would appear.

use super::mapping::{CredentialMapping, FieldSpec};
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use crate::validation::is_guid;
use k8s_openapi::api::core::v1::Secret;
use std::collections::BTreeMap;
use tracing::trace;

/// Validate a credential secret against `mapping`
///
/// Errors are located at `<path>.data[<key>]`.
pub fn validate_secret(secret: &Secret, mapping: &CredentialMapping, path: &FieldPath) -> ErrorList {
    let view = SecretView::new(secret);
    trace!(secret = %view.identity, keys = view.data.len(), "Validating credential secret");

    let data_path = path.child("data");
    let mut errors = ErrorList::new();
    errors.append(view.check_required(mapping, &data_path));
    errors.append(view.check_format(mapping, &data_path));
    errors.append(view.check_unknown_keys(mapping, &data_path));
    errors.append(view.check_allowed_values(mapping, &data_path));
    errors.append(view.check_pairs(mapping, &data_path));
    errors
}

/// Validate an updated credential secret, including immutability against `old`
pub fn validate_secret_update(
    new: &Secret,
    old: &Secret,
    mapping: &CredentialMapping,
    path: &FieldPath,
) -> ErrorList {
    let mut errors = validate_secret(new, mapping, path);

    let new_view = SecretView::new(new);
    let old_view = SecretView::new(old);
    let data_path = path.child("data");
    for (key, spec) in mapping.fields {
        if !spec.immutable {
            continue;
        }
        if new_view.bytes(key) != old_view.bytes(key) {
            errors.push(FieldError::invalid(
                &data_path.key(*key),
                BadValue::Hidden,
                format!(
                    "field {key:?} is immutable in secret {}",
                    new_view.identity
                ),
            ));
        }
    }
    errors
}

struct SecretView<'a> {
    identity: String,
    data: BTreeMap<&'a str, &'a [u8]>,
}

impl<'a> SecretView<'a> {
    fn new(secret: &'a Secret) -> Self {
        let namespace = secret.metadata.namespace.as_deref().unwrap_or_default();
        let name = secret.metadata.name.as_deref().unwrap_or_default();
        let data = secret
            .data
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.0.as_slice()))
            .collect();
        Self {
            identity: format!("{namespace}/{name}"),
            data,
        }
    }

    /// Value bytes, missing keys read as empty
    fn bytes(&self, key: &str) -> &'a [u8] {
        self.data.get(key).copied().unwrap_or_default()
    }

    fn is_set(&self, key: &str) -> bool {
        !self.bytes(key).is_empty()
    }

    fn check_required(&self, mapping: &CredentialMapping, data_path: &FieldPath) -> ErrorList {
        mapping
            .fields
            .iter()
            .filter(|(key, spec)| spec.required && !self.is_set(key))
            .map(|(key, _)| {
                FieldError::required(
                    &data_path.key(*key),
                    format!("missing required field {key:?} in secret {}", self.identity),
                )
            })
            .collect()
    }

    fn check_format(&self, mapping: &CredentialMapping, data_path: &FieldPath) -> ErrorList {
        let mut errors = ErrorList::new();
        for (key, spec) in mapping.fields {
            let value = self.bytes(key);
            if value.is_empty() {
                continue;
            }
            let field = data_path.key(*key);
            if spec.is_guid && !std::str::from_utf8(value).is_ok_and(is_guid) {
                errors.push(FieldError::invalid(
                    &field,
                    BadValue::Hidden,
                    format!("field {key:?} must be a valid GUID in secret {}", self.identity),
                ));
            }
            if value.trim_ascii().len() != value.len() {
                errors.push(FieldError::invalid(
                    &field,
                    BadValue::Hidden,
                    format!(
                        "field {key:?} must not contain leading or trailing whitespace in secret {}",
                        self.identity
                    ),
                ));
            }
        }
        errors
    }

    fn check_unknown_keys(&self, mapping: &CredentialMapping, data_path: &FieldPath) -> ErrorList {
        self.data
            .keys()
            .filter(|key| !mapping.contains(key))
            .map(|key| {
                FieldError::forbidden(
                    &data_path.key(*key),
                    format!("unexpected field {key:?} in secret {}", self.identity),
                )
            })
            .collect()
    }

    fn check_allowed_values(&self, mapping: &CredentialMapping, data_path: &FieldPath) -> ErrorList {
        let mut errors = ErrorList::new();
        for (key, FieldSpec { allowed_values, .. }) in mapping.fields {
            let value = self.bytes(key);
            if allowed_values.is_empty() || value.is_empty() {
                continue;
            }
            if !allowed_values.iter().any(|allowed| allowed.as_bytes() == value) {
                errors.push(FieldError::not_supported(
                    &data_path.key(*key),
                    BadValue::Hidden,
                    *allowed_values,
                ));
            }
        }
        errors
    }

    fn check_pairs(&self, mapping: &CredentialMapping, data_path: &FieldPath) -> ErrorList {
        let mut errors = ErrorList::new();
        for (first, second) in mapping.pairs {
            let (missing, present) = match (self.is_set(first), self.is_set(second)) {
                (true, false) => (second, first),
                (false, true) => (first, second),
                _ => continue,
            };
            errors.push(FieldError::required(
                &data_path.key(*missing),
                format!(
                    "field {missing:?} must be set together with {present:?} in secret {}",
                    self.identity
                ),
            ));
        }
        errors
    }
}
