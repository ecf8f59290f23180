//! Credential surfaces: which secret keys each consumer accepts.

use super::engine::{validate_secret, validate_secret_update};
use super::mapping::{CredentialMapping, FieldSpec};
use crate::constants::SUPPORTED_AZURE_CLOUDS;
use crate::field::{ErrorList, FieldPath};
use k8s_openapi::api::core::v1::Secret;

// Infrastructure credentials
pub const SUBSCRIPTION_ID_KEY: &str = "subscriptionID";
pub const TENANT_ID_KEY: &str = "tenantID";
pub const CLIENT_ID_KEY: &str = "clientID";
pub const CLIENT_SECRET_KEY: &str = "clientSecret";

// DNS credentials
pub const DNS_SUBSCRIPTION_ID_KEY: &str = "AZURE_SUBSCRIPTION_ID";
pub const DNS_TENANT_ID_KEY: &str = "AZURE_TENANT_ID";
pub const DNS_CLIENT_ID_KEY: &str = "AZURE_CLIENT_ID";
pub const DNS_CLIENT_SECRET_KEY: &str = "AZURE_CLIENT_SECRET";
pub const DNS_CLOUD_KEY: &str = "AZURE_CLOUD";

/// Secrets referenced by shoots and backup buckets
pub static CLOUD_PROVIDER_MAPPING: CredentialMapping = CredentialMapping {
    fields: &[
        (SUBSCRIPTION_ID_KEY, FieldSpec::optional().required().guid().immutable()),
        (TENANT_ID_KEY, FieldSpec::optional().required().guid().immutable()),
        (CLIENT_ID_KEY, FieldSpec::optional().guid()),
        (CLIENT_SECRET_KEY, FieldSpec::optional()),
    ],
    pairs: &[(CLIENT_ID_KEY, CLIENT_SECRET_KEY)],
};

/// Secrets referenced by Azure DNS providers
pub static DNS_PROVIDER_MAPPING: CredentialMapping = CredentialMapping {
    fields: &[
        (DNS_SUBSCRIPTION_ID_KEY, FieldSpec::optional().required().guid().immutable()),
        (DNS_TENANT_ID_KEY, FieldSpec::optional().required().guid().immutable()),
        (DNS_CLIENT_ID_KEY, FieldSpec::optional().guid()),
        (DNS_CLIENT_SECRET_KEY, FieldSpec::optional()),
        (DNS_CLOUD_KEY, FieldSpec::optional().one_of(SUPPORTED_AZURE_CLOUDS)),
    ],
    pairs: &[(DNS_CLIENT_ID_KEY, DNS_CLIENT_SECRET_KEY)],
};

/// Validate an infrastructure credential secret
pub fn validate_cloud_provider_secret(secret: &Secret, path: &FieldPath) -> ErrorList {
    validate_secret(secret, &CLOUD_PROVIDER_MAPPING, path)
}

/// Validate an update of an infrastructure credential secret
pub fn validate_cloud_provider_secret_update(new: &Secret, old: &Secret, path: &FieldPath) -> ErrorList {
    validate_secret_update(new, old, &CLOUD_PROVIDER_MAPPING, path)
}

/// Validate a DNS provider credential secret
pub fn validate_dns_provider_secret(secret: &Secret, path: &FieldPath) -> ErrorList {
    validate_secret(secret, &DNS_PROVIDER_MAPPING, path)
}

/// Validate an update of a DNS provider credential secret
pub fn validate_dns_provider_secret_update(new: &Secret, old: &Secret, path: &FieldPath) -> ErrorList {
    validate_secret_update(new, old, &DNS_PROVIDER_MAPPING, path)
}
