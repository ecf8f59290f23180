//! # Backup Bucket Validation
//!
//! Immutable retention policy, key rotation and cloud selection of a backup
//! bucket, plus the update rules of a locked retention policy.

use crate::apis::{BackupBucketConfig, ImmutableConfig, RetentionLock, RotationConfig};
use crate::constants::{
    MIN_ROTATION_PERIOD_DAYS, RETENTION_PERIOD_GRANULARITY_HOURS, RETENTION_TYPE_BUCKET,
    SUPPORTED_AZURE_CLOUDS,
};
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use crate::validation::validate_one_of;
use chrono::TimeDelta;
use tracing::trace;

/// Validate a backup bucket config
pub fn validate_backup_bucket_config(config: &BackupBucketConfig, path: &FieldPath) -> ErrorList {
    trace!(lock = ?config.retention_lock(), "Validating backup bucket config");
    let mut errors = ErrorList::new();

    if let Some(immutability) = &config.immutability {
        errors.append(validate_immutability(immutability, &path.child("immutability")));
    }
    if let Some(rotation) = &config.rotation_config {
        errors.append(validate_rotation(rotation, &path.child("rotationConfig")));
    }
    if let Some(cloud) = &config.cloud_configuration {
        errors.append(validate_one_of(
            &cloud.name,
            SUPPORTED_AZURE_CLOUDS,
            &path.child("cloudConfiguration").child("name"),
        ));
    }
    errors
}

fn validate_immutability(immutability: &ImmutableConfig, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();

    if immutability.retention_type != RETENTION_TYPE_BUCKET {
        errors.push(FieldError::not_supported(
            &path.child("retentionType"),
            BadValue::of(&immutability.retention_type),
            &[RETENTION_TYPE_BUCKET],
        ));
    }

    let granularity = TimeDelta::hours(RETENTION_PERIOD_GRANULARITY_HOURS);
    let period = immutability.retention_period;
    let period_path = path.child("retentionPeriod");
    if period.as_delta() < granularity {
        errors.push(FieldError::invalid(
            &period_path,
            BadValue::of(&period),
            format!(
                "must be a positive duration greater than {RETENTION_PERIOD_GRANULARITY_HOURS}h"
            ),
        ));
    } else if !is_multiple_of(period.as_delta(), granularity) {
        errors.push(FieldError::invalid(
            &period_path,
            BadValue::of(&period),
            format!("must be a multiple of {RETENTION_PERIOD_GRANULARITY_HOURS}h"),
        ));
    }
    errors
}

fn is_multiple_of(value: TimeDelta, unit: TimeDelta) -> bool {
    match (value.num_nanoseconds(), unit.num_nanoseconds()) {
        (Some(value), Some(unit)) if unit != 0 => value % unit == 0,
        _ => false,
    }
}

fn validate_rotation(rotation: &RotationConfig, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();
    let rotation_path = path.child("rotationPeriodDays");

    if rotation.rotation_period_days < 1 {
        errors.push(FieldError::required(
            &rotation_path,
            "must provide a rotation period in days",
        ));
    } else if rotation.rotation_period_days < MIN_ROTATION_PERIOD_DAYS {
        errors.push(FieldError::invalid(
            &rotation_path,
            BadValue::of(&rotation.rotation_period_days),
            format!("must be at least {MIN_ROTATION_PERIOD_DAYS} days"),
        ));
    }

    if let Some(expiration) = rotation.expiration_period_days {
        if expiration <= rotation.rotation_period_days {
            errors.push(FieldError::invalid(
                &path.child("expirationPeriodDays"),
                BadValue::of(&expiration),
                "must be greater than the rotation period",
            ));
        }
    }
    errors
}

/// Validate a backup bucket config update against the previous config
///
/// Only a locked retention policy constrains updates: it cannot be removed
/// or unlocked and its period can only grow.
pub fn validate_backup_bucket_config_update(
    old: &BackupBucketConfig,
    new: &BackupBucketConfig,
    path: &FieldPath,
) -> ErrorList {
    let old_lock = old.retention_lock();
    let new_lock = new.retention_lock();
    trace!(?old_lock, ?new_lock, "Validating backup bucket config update");

    let immutability_path = path.child("immutability");
    match (old_lock, new_lock) {
        (RetentionLock::Absent | RetentionLock::Unlocked, _) => ErrorList::new(),
        (RetentionLock::Locked, RetentionLock::Absent) => FieldError::forbidden(
            &immutability_path,
            "immutability cannot be disabled once it is locked",
        )
        .into(),
        (RetentionLock::Locked, RetentionLock::Unlocked) => FieldError::forbidden(
            &immutability_path.child("locked"),
            "immutable retention policy lock cannot be unlocked once it is locked",
        )
        .into(),
        (RetentionLock::Locked, RetentionLock::Locked) => {
            let (Some(old_policy), Some(new_policy)) = (&old.immutability, &new.immutability)
            else {
                return ErrorList::new();
            };
            if new_policy.retention_period < old_policy.retention_period {
                FieldError::forbidden(
                    &immutability_path.child("retentionPeriod"),
                    format!(
                        "reducing the retention period from {} to {} is prohibited when the immutable retention policy is locked",
                        old_policy.retention_period, new_policy.retention_period
                    ),
                )
                .into()
            } else {
                ErrorList::new()
            }
        }
    }
}
