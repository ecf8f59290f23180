//! # Azure Resource ID Validation
//!
//! Parses Azure Resource Manager (ARM) resource IDs of the form
//! `/subscriptions/<guid>/resourceGroups/<rg>/providers/<namespace>/<type>/<name>[/<type>/<name>...]`.

use super::guid::is_guid;
use super::names::{validate_resource_group_name, validate_resource_name};
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing a resource ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceIdError {
    #[error("resource id must start with '/'")]
    MissingLeadingSlash,

    #[error("resource id must start with '/subscriptions/<id>'")]
    MissingSubscription,

    #[error("segment '{0}' has no value")]
    DanglingSegment(String),

    #[error("unexpected segment '{0}', expected 'resourceGroups' or 'providers'")]
    UnexpectedSegment(String),

    #[error("resource id contains an empty segment")]
    EmptySegment,
}

/// A parsed ARM resource ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub subscription_id: String,
    pub resource_group: Option<String>,
    pub provider_namespace: Option<String>,
    /// `(type, name)` pairs, outermost first
    pub resources: Vec<(String, String)>,
}

impl ResourceId {
    /// Fully qualified resource type, e.g. `Microsoft.Network/ddosProtectionPlans`
    #[must_use]
    pub fn resource_type(&self) -> Option<String> {
        let namespace = self.provider_namespace.as_ref()?;
        let types: Vec<&str> = self.resources.iter().map(|(t, _)| t.as_str()).collect();
        Some(format!("{namespace}/{}", types.join("/")))
    }

    /// Name of the innermost resource
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.resources.last().map(|(_, n)| n.as_str())
    }
}

impl FromStr for ResourceId {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix('/').ok_or(ResourceIdError::MissingLeadingSlash)?;
        let segments: Vec<&str> = rest.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ResourceIdError::EmptySegment);
        }

        let mut iter = segments.into_iter();
        let subscription_id = match (iter.next(), iter.next()) {
            (Some(key), Some(value)) if key.eq_ignore_ascii_case("subscriptions") => {
                value.to_string()
            }
            (Some(key), None) if key.eq_ignore_ascii_case("subscriptions") => {
                return Err(ResourceIdError::DanglingSegment(key.to_string()))
            }
            _ => return Err(ResourceIdError::MissingSubscription),
        };

        let mut id = ResourceId {
            subscription_id,
            resource_group: None,
            provider_namespace: None,
            resources: Vec::new(),
        };

        while let Some(key) = iter.next() {
            let value = iter
                .next()
                .ok_or_else(|| ResourceIdError::DanglingSegment(key.to_string()))?;
            if id.provider_namespace.is_some() {
                id.resources.push((key.to_string(), value.to_string()));
            } else if key.eq_ignore_ascii_case("resourceGroups") && id.resource_group.is_none() {
                id.resource_group = Some(value.to_string());
            } else if key.eq_ignore_ascii_case("providers") {
                id.provider_namespace = Some(value.to_string());
                // namespace is followed by the first type/name pair
                let resource_type = iter
                    .next()
                    .ok_or_else(|| ResourceIdError::DanglingSegment(value.to_string()))?;
                let name = iter
                    .next()
                    .ok_or_else(|| ResourceIdError::DanglingSegment(resource_type.to_string()))?;
                id.resources.push((resource_type.to_string(), name.to_string()));
            } else {
                return Err(ResourceIdError::UnexpectedSegment(key.to_string()));
            }
        }

        Ok(id)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/subscriptions/{}", self.subscription_id)?;
        if let Some(rg) = &self.resource_group {
            write!(f, "/resourceGroups/{rg}")?;
        }
        if let Some(namespace) = &self.provider_namespace {
            write!(f, "/providers/{namespace}")?;
            for (t, n) in &self.resources {
                write!(f, "/{t}/{n}")?;
            }
        }
        Ok(())
    }
}

/// Validate an ARM resource ID, optionally of a specific resource type
///
/// Parse failures stop further checks. Otherwise the subscription must be a
/// GUID, the resource group and resource names must follow Azure naming rules,
/// and the type must match `expected_type` (case-insensitive) when given.
pub fn validate_resource_id(value: &str, expected_type: Option<&str>, path: &FieldPath) -> ErrorList {
    let id = match value.parse::<ResourceId>() {
        Ok(id) => id,
        Err(e) => {
            return FieldError::invalid(path, BadValue::of(&value), format!("invalid resource id: {e}"))
                .into()
        }
    };

    let mut errors = ErrorList::new();
    if !is_guid(&id.subscription_id) {
        errors.push(FieldError::invalid(
            path,
            BadValue::of(&value),
            format!("subscription '{}' must be a valid GUID", id.subscription_id),
        ));
    }
    if let Some(rg) = &id.resource_group {
        errors.extend(
            validate_resource_group_name(rg, path)
                .into_iter()
                .map(|e| retarget(e, value, "resource group")),
        );
    }
    if let Some(name) = id.name() {
        errors.extend(
            validate_resource_name(name, path)
                .into_iter()
                .map(|e| retarget(e, value, "resource name")),
        );
    }
    if let Some(expected) = expected_type {
        let matches = id
            .resource_type()
            .is_some_and(|t| t.eq_ignore_ascii_case(expected));
        if !matches {
            errors.push(FieldError::invalid(
                path,
                BadValue::of(&value),
                format!("must reference a resource of type {expected}"),
            ));
        }
    }
    errors
}

// Name rules report the segment; report the whole id instead.
fn retarget(error: FieldError, value: &str, what: &str) -> FieldError {
    FieldError::invalid(
        error.field(),
        BadValue::of(&value),
        format!("{what} {}", error.detail()),
    )
}
