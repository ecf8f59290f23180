//! # Prelude
//!
//! Re-exports commonly used types for convenience.
//!
//! ## Usage
//!
//! ```rust
//! use azure_provider_validation::prelude::*;
//!
//! let config = BackupBucketConfig::default();
//! let errors = validate_backup_bucket_config(&config, &FieldPath::root());
//! assert!(errors.is_empty());
//! ```
//!
//! This brings into scope:
//! - `FieldPath`, `FieldError`, `ErrorList`, `ErrorKind`, `BadValue` - Error model
//! - `AdmissionValidator`, `AdmissionConfig`, `CredentialSurface` - Admission facade
//! - The typed provider configs and the validator for each of them

// Error model
pub use crate::field::{BadValue, ErrorKind, ErrorList, FieldError, FieldPath};

// Admission facade
pub use crate::admission::{AdmissionValidator, CredentialSurface, Operation};
pub use crate::config::AdmissionConfig;

// Typed provider configs
pub use crate::apis::{
    BackupBucketConfig, CloudProfileConfig, ControlPlaneConfig, InfrastructureConfig,
    MetaDuration, WorkerConfig, WorkloadIdentityConfig,
};

// Validators
pub use crate::backupbucket::{validate_backup_bucket_config, validate_backup_bucket_config_update};
pub use crate::cloudprofile::validate_cloud_profile_config;
pub use crate::controlplane::validate_control_plane_config;
pub use crate::credentials::{
    validate_cloud_provider_secret, validate_cloud_provider_secret_update,
    validate_dns_provider_secret, validate_dns_provider_secret_update,
};
pub use crate::infrastructure::{
    validate_infrastructure_config, validate_infrastructure_config_update, InfrastructureContext,
};
pub use crate::shoot::{validate_networking, validate_workers, validate_workers_update};
pub use crate::workloadidentity::{
    validate_workload_identity_config, validate_workload_identity_config_update,
};
