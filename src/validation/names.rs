//! # Azure Name Validation
//!
//! Naming rules for Azure resources referenced from provider configuration,
//! built from the primitive combinators.
//! Reference: https://learn.microsoft.com/en-us/azure/azure-resource-manager/management/resource-name-rules

use super::primitives::{all_of, matches, max_length, min_length, not_empty, not_ending_with, ValidateFn};
use crate::constants::{
    MAX_RESOURCE_GROUP_NAME_LENGTH, MAX_RESOURCE_NAME_LENGTH, MAX_VNET_NAME_LENGTH,
    MIN_VNET_NAME_LENGTH,
};
use crate::field::{ErrorList, FieldPath};
use regex::Regex;
use std::sync::LazyLock;

// Resource group: alphanumerics, underscores, parentheses, hyphens, periods
static RESOURCE_GROUP_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-\w._()]+$").expect("resource group regex is a valid literal")
});

// VNet: start alphanumeric, end alphanumeric or underscore
static VNET_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([-a-zA-Z0-9_.]*[a-zA-Z0-9_])?$")
        .expect("vnet name regex is a valid literal")
});

// Generic resource (public IP, managed identity)
static RESOURCE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([-\w.]*\w)?$").expect("resource name regex is a valid literal")
});

static RESOURCE_GROUP_NAME: LazyLock<ValidateFn<str>> = LazyLock::new(|| {
    all_of(vec![
        not_empty(),
        max_length(MAX_RESOURCE_GROUP_NAME_LENGTH),
        matches(
            &RESOURCE_GROUP_NAME_REGEX,
            "must consist of alphanumerics, underscores, parentheses, hyphens and periods",
        ),
        not_ending_with("."),
    ])
});

static VNET_NAME: LazyLock<ValidateFn<str>> = LazyLock::new(|| {
    all_of(vec![
        not_empty(),
        min_length(MIN_VNET_NAME_LENGTH),
        max_length(MAX_VNET_NAME_LENGTH),
        matches(
            &VNET_NAME_REGEX,
            "must start with an alphanumeric, end with an alphanumeric or underscore and contain only alphanumerics, underscores, periods and hyphens",
        ),
    ])
});

static RESOURCE_NAME: LazyLock<ValidateFn<str>> = LazyLock::new(|| {
    all_of(vec![
        not_empty(),
        max_length(MAX_RESOURCE_NAME_LENGTH),
        matches(
            &RESOURCE_NAME_REGEX,
            "must start with an alphanumeric, end with an alphanumeric or underscore and contain only alphanumerics, underscores, periods and hyphens",
        ),
    ])
});

/// Validate an Azure resource group name (1-90 characters)
pub fn validate_resource_group_name(name: &str, path: &FieldPath) -> ErrorList {
    (*RESOURCE_GROUP_NAME)(name, path)
}

/// Validate an Azure virtual network name (2-64 characters)
pub fn validate_vnet_name(name: &str, path: &FieldPath) -> ErrorList {
    (*VNET_NAME)(name, path)
}

/// Validate a generic Azure resource name (1-80 characters)
pub fn validate_resource_name(name: &str, path: &FieldPath) -> ErrorList {
    (*RESOURCE_NAME)(name, path)
}
