//! # Admission
//!
//! Entry point for admission webhooks: decodes the provider configuration
//! embedded in orchestrator resources and dispatches create or update
//! validation per object family.
//!
//! ```rust,ignore
//! let validator = AdmissionValidator::new(AdmissionConfig::from_env());
//! let errors = validator.validate_shoot(&shoot, old_shoot.as_ref());
//! if !errors.is_empty() {
//!     return deny(errors.to_string());
//! }
//! ```

mod decode;

pub use decode::{decode_at, decode_provider_config, DecodeError};

use crate::apis::{
    BackupBucket, BackupBucketConfig, CloudProfile, CloudProfileConfig, Shoot, WorkloadIdentity,
    WorkloadIdentityConfig,
};
use crate::backupbucket::{validate_backup_bucket_config, validate_backup_bucket_config_update};
use crate::cloudprofile::validate_cloud_profile_config;
use crate::config::AdmissionConfig;
use crate::constants::PROVIDER_TYPE;
use crate::credentials::{
    validate_cloud_provider_secret, validate_cloud_provider_secret_update,
    validate_dns_provider_secret, validate_dns_provider_secret_update,
};
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use crate::shoot::{validate_shoot, validate_shoot_update};
use crate::workloadidentity::{
    validate_workload_identity_config, validate_workload_identity_config_update,
};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

/// Admission operation, derived from the presence of the old object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}

impl Operation {
    fn of<T>(old: Option<&T>) -> Self {
        if old.is_some() {
            Operation::Update
        } else {
            Operation::Create
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => f.write_str("CREATE"),
            Operation::Update => f.write_str("UPDATE"),
        }
    }
}

/// Where a credential secret is used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSurface {
    /// Referenced by a shoot for infrastructure provisioning
    Infrastructure,
    /// Referenced by a DNS provider
    Dns,
}

/// Dispatches validation of Azure provider resources
#[derive(Debug, Clone, Default)]
pub struct AdmissionValidator {
    config: AdmissionConfig,
}

fn identity(metadata: &ObjectMeta) -> String {
    let name = metadata.name.as_deref().unwrap_or_default();
    match metadata.namespace.as_deref() {
        Some(namespace) => format!("{namespace}/{name}"),
        None => name.to_string(),
    }
}

impl AdmissionValidator {
    #[must_use]
    pub fn new(config: AdmissionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// `None` when validation should proceed, otherwise the result to return
    /// for a resource of another provider
    fn foreign_provider(&self, provider_type: &str, path: &FieldPath) -> Option<ErrorList> {
        if provider_type == PROVIDER_TYPE {
            return None;
        }
        if self.config.reject_unknown_provider_types {
            return Some(
                FieldError::not_supported(path, BadValue::of(&provider_type), &[PROVIDER_TYPE])
                    .into(),
            );
        }
        debug!(provider_type, "Skipping resource of another provider");
        Some(ErrorList::new())
    }

    /// Validate a shoot; `old` is set on update
    pub fn validate_shoot(&self, shoot: &Shoot, old: Option<&Shoot>) -> ErrorList {
        if !self.config.validate_shoots {
            return ErrorList::new();
        }
        let operation = Operation::of(old);
        let name = identity(&shoot.metadata);
        debug!(kind = "Shoot", %name, %operation, "Validating");

        let type_path = FieldPath::from_names(["spec", "provider", "type"]);
        if let Some(result) = self.foreign_provider(&shoot.spec.provider.type_, &type_path) {
            return report("Shoot", &name, result);
        }

        let errors = match old {
            Some(old) => validate_shoot_update(old, shoot),
            None => validate_shoot(shoot),
        };
        report("Shoot", &name, errors)
    }

    /// Validate a cloud profile
    pub fn validate_cloud_profile(&self, profile: &CloudProfile) -> ErrorList {
        if !self.config.validate_cloud_profiles {
            return ErrorList::new();
        }
        let name = identity(&profile.metadata);
        debug!(kind = "CloudProfile", %name, "Validating");

        let spec_path = FieldPath::new("spec");
        if let Some(result) = self.foreign_provider(&profile.spec.type_, &spec_path.child("type")) {
            return report("CloudProfile", &name, result);
        }

        let config_path = spec_path.child("providerConfig");
        let errors = match required_config::<CloudProfileConfig>(
            profile.spec.provider_config.as_ref(),
            "CloudProfileConfig",
            &config_path,
        ) {
            Ok(config) => {
                validate_cloud_profile_config(&config, &profile.spec.machine_images, &config_path)
            }
            Err(e) => e.into(),
        };
        report("CloudProfile", &name, errors)
    }

    /// Validate a backup bucket; `old` is set on update
    ///
    /// A bucket without provider config has nothing to validate.
    pub fn validate_backup_bucket(&self, bucket: &BackupBucket, old: Option<&BackupBucket>) -> ErrorList {
        if !self.config.validate_backup_buckets {
            return ErrorList::new();
        }
        let operation = Operation::of(old);
        let name = identity(&bucket.metadata);
        debug!(kind = "BackupBucket", %name, %operation, "Validating");

        let spec_path = FieldPath::new("spec");
        let type_path = spec_path.child("provider").child("type");
        if let Some(result) = self.foreign_provider(&bucket.spec.provider.type_, &type_path) {
            return report("BackupBucket", &name, result);
        }

        let config_path = spec_path.child("providerConfig");
        let Some(raw) = &bucket.spec.provider_config else {
            return ErrorList::new();
        };
        let config = match decode_at::<BackupBucketConfig>(raw, "BackupBucketConfig", &config_path) {
            Ok(config) => config,
            Err(e) => return report("BackupBucket", &name, e.into()),
        };

        let mut errors = ErrorList::new();
        if let Some(old_raw) = old.and_then(|old| old.spec.provider_config.as_ref()) {
            match decode_at::<BackupBucketConfig>(old_raw, "BackupBucketConfig", &config_path) {
                Ok(old_config) => errors.append(validate_backup_bucket_config_update(
                    &old_config,
                    &config,
                    &config_path,
                )),
                Err(e) => errors.push(FieldError::internal(
                    &config_path,
                    format!("previous config could not be decoded: {}", e.detail()),
                )),
            }
        }
        errors.append(validate_backup_bucket_config(&config, &config_path));
        report("BackupBucket", &name, errors)
    }

    /// Validate a credential secret for the given surface; `old` is set on
    /// update
    pub fn validate_secret(
        &self,
        secret: &Secret,
        old: Option<&Secret>,
        surface: CredentialSurface,
    ) -> ErrorList {
        if !self.config.validate_secrets {
            return ErrorList::new();
        }
        let operation = Operation::of(old);
        let name = identity(&secret.metadata);
        debug!(kind = "Secret", %name, %operation, ?surface, "Validating");

        let path = FieldPath::root();
        let errors = match (surface, old) {
            (CredentialSurface::Infrastructure, None) => validate_cloud_provider_secret(secret, &path),
            (CredentialSurface::Infrastructure, Some(old)) => {
                validate_cloud_provider_secret_update(secret, old, &path)
            }
            (CredentialSurface::Dns, None) => validate_dns_provider_secret(secret, &path),
            (CredentialSurface::Dns, Some(old)) => {
                validate_dns_provider_secret_update(secret, old, &path)
            }
        };
        report("Secret", &name, errors)
    }

    /// Validate a workload identity; `old` is set on update
    pub fn validate_workload_identity(
        &self,
        identity_object: &WorkloadIdentity,
        old: Option<&WorkloadIdentity>,
    ) -> ErrorList {
        if !self.config.validate_workload_identities {
            return ErrorList::new();
        }
        let operation = Operation::of(old);
        let name = identity(&identity_object.metadata);
        debug!(kind = "WorkloadIdentity", %name, %operation, "Validating");

        let target_path = FieldPath::from_names(["spec", "targetSystem"]);
        let target = &identity_object.spec.target_system;
        if let Some(result) = self.foreign_provider(&target.type_, &target_path.child("type")) {
            return report("WorkloadIdentity", &name, result);
        }

        let config_path = target_path.child("providerConfig");
        let config = match required_config::<WorkloadIdentityConfig>(
            target.provider_config.as_ref(),
            "WorkloadIdentityConfig",
            &config_path,
        ) {
            Ok(config) => config,
            Err(e) => return report("WorkloadIdentity", &name, e.into()),
        };

        let old_config = old
            .and_then(|old| old.spec.target_system.provider_config.as_ref())
            .and_then(|raw| {
                decode_at::<WorkloadIdentityConfig>(raw, "WorkloadIdentityConfig", &config_path).ok()
            });
        let errors = match old_config {
            Some(old_config) => {
                validate_workload_identity_config_update(&old_config, &config, &config_path)
            }
            None => validate_workload_identity_config(&config, &config_path),
        };
        report("WorkloadIdentity", &name, errors)
    }
}

fn required_config<T: serde::de::DeserializeOwned>(
    raw: Option<&Value>,
    kind: &'static str,
    path: &FieldPath,
) -> Result<T, FieldError> {
    match raw {
        Some(raw) => decode_at(raw, kind, path),
        None => Err(FieldError::required(path, format!("{kind} must be set"))),
    }
}

fn report(kind: &str, name: &str, errors: ErrorList) -> ErrorList {
    if !errors.is_empty() {
        info!(kind, name, errors = errors.len(), "Rejecting invalid resource");
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ErrorKind;
    use k8s_openapi::ByteString;
    use serde_json::json;
    use std::collections::BTreeMap;

    const GUID: &str = "a6ad693a-028a-422c-b064-d76a4586f2b3";

    fn validator() -> AdmissionValidator {
        AdmissionValidator::default()
    }

    #[test]
    fn test_operation() {
        assert_eq!(Operation::of::<Shoot>(None), Operation::Create);
        assert_eq!(Operation::of(Some(&Shoot::default())), Operation::Update);
        assert_eq!(Operation::Update.to_string(), "UPDATE");
    }

    #[test]
    fn test_foreign_shoot_is_skipped() {
        let mut shoot = Shoot::default();
        shoot.spec.provider.type_ = "gcp".to_string();
        assert!(validator().validate_shoot(&shoot, None).is_empty());

        let strict = AdmissionValidator::new(AdmissionConfig {
            reject_unknown_provider_types: true,
            ..AdmissionConfig::default()
        });
        assert_eq!(
            strict.validate_shoot(&shoot, None).signature(),
            vec![(ErrorKind::NotSupported, "spec.provider.type".to_string())]
        );
    }

    #[test]
    fn test_disabled_family() {
        let validator = AdmissionValidator::new(AdmissionConfig {
            validate_shoots: false,
            ..AdmissionConfig::default()
        });
        let mut shoot = Shoot::default();
        shoot.spec.provider.type_ = PROVIDER_TYPE.to_string();
        assert!(validator.validate_shoot(&shoot, None).is_empty());
        assert!(!AdmissionValidator::default().validate_shoot(&shoot, None).is_empty());
    }

    #[test]
    fn test_cloud_profile_requires_provider_config() {
        let mut profile = CloudProfile::default();
        profile.spec.type_ = PROVIDER_TYPE.to_string();
        assert_eq!(
            validator().validate_cloud_profile(&profile).signature(),
            vec![(ErrorKind::Required, "spec.providerConfig".to_string())]
        );
    }

    #[test]
    fn test_backup_bucket_update() {
        let bucket = |hours: u32| {
            let mut bucket = BackupBucket::default();
            bucket.spec.provider.type_ = PROVIDER_TYPE.to_string();
            bucket.spec.provider_config = Some(json!({
                "immutability": {"retentionType": "bucket", "retentionPeriod": format!("{hours}h"), "locked": true}
            }));
            bucket
        };
        assert!(validator().validate_backup_bucket(&bucket(48), None).is_empty());
        assert!(validator()
            .validate_backup_bucket(&bucket(72), Some(&bucket(48)))
            .is_empty());
        assert_eq!(
            validator()
                .validate_backup_bucket(&bucket(24), Some(&bucket(48)))
                .signature(),
            vec![(
                ErrorKind::Forbidden,
                "spec.providerConfig.immutability.retentionPeriod".to_string()
            )]
        );
    }

    #[test]
    fn test_backup_bucket_without_config() {
        let mut bucket = BackupBucket::default();
        bucket.spec.provider.type_ = PROVIDER_TYPE.to_string();
        assert!(validator().validate_backup_bucket(&bucket, None).is_empty());
    }

    #[test]
    fn test_secret_surfaces() {
        let secret = Secret {
            data: Some(BTreeMap::from([
                ("subscriptionID".to_string(), ByteString(GUID.as_bytes().to_vec())),
                ("tenantID".to_string(), ByteString(GUID.as_bytes().to_vec())),
            ])),
            ..Secret::default()
        };
        assert!(validator()
            .validate_secret(&secret, None, CredentialSurface::Infrastructure)
            .is_empty());
        // the DNS surface expects AZURE_* keys
        assert!(!validator()
            .validate_secret(&secret, None, CredentialSurface::Dns)
            .is_empty());
    }

    #[test]
    fn test_workload_identity_update() {
        let other = "ee16e593-3035-41b9-a217-958f8f75b750";
        let object = |tenant: &str| {
            let mut object = WorkloadIdentity::default();
            object.spec.target_system.type_ = PROVIDER_TYPE.to_string();
            object.spec.target_system.provider_config = Some(json!({
                "clientID": GUID, "tenantID": tenant, "subscriptionID": GUID
            }));
            object
        };
        assert!(validator().validate_workload_identity(&object(GUID), None).is_empty());
        assert_eq!(
            validator()
                .validate_workload_identity(&object(other), Some(&object(GUID)))
                .signature(),
            vec![(
                ErrorKind::Invalid,
                "spec.targetSystem.providerConfig.tenantID".to_string()
            )]
        );
    }
}
