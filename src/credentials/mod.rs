//! # Credentials
//!
//! Schema-driven validation of credential secrets. Each surface (cloud
//! provider, DNS provider) is a [`CredentialMapping`] table; adding a surface
//! is a data change.

mod engine;
mod mapping;
mod surfaces;

pub use engine::{validate_secret, validate_secret_update};
pub use mapping::{CredentialMapping, FieldSpec};
pub use surfaces::{
    validate_cloud_provider_secret, validate_cloud_provider_secret_update,
    validate_dns_provider_secret, validate_dns_provider_secret_update, CLIENT_ID_KEY,
    CLIENT_SECRET_KEY, CLOUD_PROVIDER_MAPPING, DNS_CLIENT_ID_KEY, DNS_CLIENT_SECRET_KEY,
    DNS_CLOUD_KEY, DNS_PROVIDER_MAPPING, DNS_SUBSCRIPTION_ID_KEY, DNS_TENANT_ID_KEY,
    SUBSCRIPTION_ID_KEY, TENANT_ID_KEY,
};
