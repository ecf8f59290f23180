//! Backup bucket provider configuration (`spec.providerConfig`).

use super::duration::MetaDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupBucketConfig {
    /// Immutable blob storage retention policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immutability: Option<ImmutableConfig>,
    /// Storage account key rotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_config: Option<RotationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_configuration: Option<CloudConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImmutableConfig {
    /// Scope of the retention policy; only "bucket" is supported
    #[serde(default)]
    pub retention_type: String,
    #[serde(default)]
    #[schemars(with = "String")]
    pub retention_period: MetaDuration,
    /// A locked policy can only be extended
    #[serde(default)]
    pub locked: bool,
}

impl ImmutableConfig {
    /// Whether every field holds its zero value
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == ImmutableConfig::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RotationConfig {
    pub rotation_period_days: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_period_days: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudConfiguration {
    pub name: String,
}

/// Lock state of a retention policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionLock {
    Absent,
    Unlocked,
    Locked,
}

impl RetentionLock {
    /// State of an optional policy; a zero-valued policy counts as absent
    #[must_use]
    pub fn of(immutability: Option<&ImmutableConfig>) -> Self {
        match immutability {
            None => RetentionLock::Absent,
            Some(config) if config.is_zero() => RetentionLock::Absent,
            Some(config) if config.locked => RetentionLock::Locked,
            Some(_) => RetentionLock::Unlocked,
        }
    }
}

impl BackupBucketConfig {
    #[must_use]
    pub fn retention_lock(&self) -> RetentionLock {
        RetentionLock::of(self.immutability.as_ref())
    }
}
