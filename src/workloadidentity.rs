//! # Workload Identity Validation

use crate::apis::WorkloadIdentityConfig;
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use crate::validation::validate_guid;
use tracing::trace;

/// Validate a workload identity config: all three ids are GUIDs
pub fn validate_workload_identity_config(config: &WorkloadIdentityConfig, path: &FieldPath) -> ErrorList {
    trace!("Validating workload identity config");
    let mut errors = ErrorList::new();
    errors.append(validate_guid(&config.client_id, &path.child("clientID")));
    errors.append(validate_guid(&config.tenant_id, &path.child("tenantID")));
    errors.append(validate_guid(
        &config.subscription_id,
        &path.child("subscriptionID"),
    ));
    errors
}

/// Validate a workload identity config update
///
/// The tenant and subscription are fixed; the client may be rotated.
pub fn validate_workload_identity_config_update(
    old: &WorkloadIdentityConfig,
    new: &WorkloadIdentityConfig,
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();
    if old.tenant_id != new.tenant_id {
        errors.push(FieldError::immutable(
            &path.child("tenantID"),
            BadValue::of(&new.tenant_id),
        ));
    }
    if old.subscription_id != new.subscription_id {
        errors.push(FieldError::immutable(
            &path.child("subscriptionID"),
            BadValue::of(&new.subscription_id),
        ));
    }
    errors.append(validate_workload_identity_config(new, path));
    errors
}
