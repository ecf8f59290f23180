//! # Admission Configuration
//!
//! Settings of the admission facade loaded from environment variables.
//! The validators themselves take no configuration.

/// Prefix of every environment variable read by [`AdmissionConfig::from_env`]
pub const ENV_PREFIX: &str = "AZURE_VALIDATION_";

/// Admission facade configuration
///
/// All families are validated by default. Each flag can be overridden via
/// `AZURE_VALIDATION_<FLAG>` (e.g. `AZURE_VALIDATION_VALIDATE_SECRETS=false`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(
    clippy::struct_excessive_bools,
    reason = "independent per-family switches"
)]
pub struct AdmissionConfig {
    pub validate_shoots: bool,
    pub validate_cloud_profiles: bool,
    pub validate_backup_buckets: bool,
    /// Credential secrets of both the infrastructure and DNS surfaces
    pub validate_secrets: bool,
    pub validate_workload_identities: bool,
    /// Report shoots of other providers instead of skipping them
    pub reject_unknown_provider_types: bool,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            validate_shoots: true,
            validate_cloud_profiles: true,
            validate_backup_buckets: true,
            validate_secrets: true,
            validate_workload_identities: true,
            reject_unknown_provider_types: false,
        }
    }
}

impl AdmissionConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Keys are passed with [`ENV_PREFIX`] already applied.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |name: &str, default: bool| {
            env_var_or_default_bool(&lookup, &format!("{ENV_PREFIX}{name}"), default)
        };
        Self {
            validate_shoots: flag("VALIDATE_SHOOTS", defaults.validate_shoots),
            validate_cloud_profiles: flag(
                "VALIDATE_CLOUD_PROFILES",
                defaults.validate_cloud_profiles,
            ),
            validate_backup_buckets: flag(
                "VALIDATE_BACKUP_BUCKETS",
                defaults.validate_backup_buckets,
            ),
            validate_secrets: flag("VALIDATE_SECRETS", defaults.validate_secrets),
            validate_workload_identities: flag(
                "VALIDATE_WORKLOAD_IDENTITIES",
                defaults.validate_workload_identities,
            ),
            reject_unknown_provider_types: flag(
                "REJECT_UNKNOWN_PROVIDER_TYPES",
                defaults.reject_unknown_provider_types,
            ),
        }
    }
}

/// Read variable as boolean or return default
fn env_var_or_default_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            let v_lower = v.trim().to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}
