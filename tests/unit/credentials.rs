//! # Credential Secret Tests
//!
//! Both credential surfaces, create and update.

use crate::common::{from_yaml, init_tracing, sig};
use azure_provider_validation::credentials::{
    validate_cloud_provider_secret, validate_cloud_provider_secret_update,
    validate_dns_provider_secret,
};
use azure_provider_validation::field::{ErrorKind, FieldPath};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;

const GUID_A: &str = "a6ad693a-028a-422c-b064-d76a4586f2b3";
const GUID_B: &str = "ee16e593-3035-41b9-a217-958f8f75b750";

fn secret(entries: &[(&str, &str)]) -> Secret {
    init_tracing();
    let mut secret: Secret = from_yaml(
        r"
metadata:
  namespace: garden-dev
  name: azure-credentials
type: Opaque
",
    );
    secret.data = Some(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), ByteString(v.as_bytes().to_vec())))
            .collect(),
    );
    secret
}

#[test]
fn test_missing_required_keys() {
    let errors = validate_cloud_provider_secret(&secret(&[]), &FieldPath::root());
    assert_eq!(
        errors.signature(),
        sig(&[
            (ErrorKind::Required, "data[subscriptionID]"),
            (ErrorKind::Required, "data[tenantID]"),
        ])
    );
}

#[test]
fn test_every_problem_is_reported() {
    let errors = validate_cloud_provider_secret(
        &secret(&[
            ("subscriptionID", "not-a-guid"),
            ("tenantID", GUID_B),
            ("clientID", GUID_A),
            ("region", "westeurope"),
        ]),
        &FieldPath::root(),
    );
    assert_eq!(
        errors.signature(),
        sig(&[
            (ErrorKind::Required, "data[clientSecret]"),
            (ErrorKind::Invalid, "data[subscriptionID]"),
            (ErrorKind::Forbidden, "data[region]"),
        ])
    );
    for error in &errors {
        assert!(!error.to_string().contains("not-a-guid"), "{error}");
    }
}

#[test]
fn test_update_immutable_ids() {
    let old = secret(&[("subscriptionID", GUID_A), ("tenantID", GUID_B)]);
    let rotated_client = secret(&[
        ("subscriptionID", GUID_A),
        ("tenantID", GUID_B),
        ("clientID", GUID_B),
        ("clientSecret", "s3cr3t"),
    ]);
    assert!(validate_cloud_provider_secret_update(&rotated_client, &old, &FieldPath::root()).is_empty());

    let moved = secret(&[("subscriptionID", GUID_B), ("tenantID", GUID_B)]);
    let errors = validate_cloud_provider_secret_update(&moved, &old, &FieldPath::root());
    assert_eq!(
        errors.signature(),
        sig(&[(ErrorKind::Invalid, "data[subscriptionID]")])
    );
    assert!(errors.as_slice()[0].bad_value().is_hidden());
}

#[test]
fn test_dns_surface() {
    let valid = secret(&[
        ("AZURE_SUBSCRIPTION_ID", GUID_A),
        ("AZURE_TENANT_ID", GUID_B),
        ("AZURE_CLIENT_ID", GUID_A),
        ("AZURE_CLIENT_SECRET", "s3cr3t"),
        ("AZURE_CLOUD", "AzureGovernment"),
    ]);
    assert!(validate_dns_provider_secret(&valid, &FieldPath::root()).is_empty());

    // infrastructure keys are unknown on the DNS surface
    let errors = validate_dns_provider_secret(
        &secret(&[("subscriptionID", GUID_A), ("tenantID", GUID_B)]),
        &FieldPath::root(),
    );
    assert_eq!(
        errors.signature(),
        sig(&[
            (ErrorKind::Required, "data[AZURE_SUBSCRIPTION_ID]"),
            (ErrorKind::Required, "data[AZURE_TENANT_ID]"),
            (ErrorKind::Forbidden, "data[subscriptionID]"),
            (ErrorKind::Forbidden, "data[tenantID]"),
        ])
    );
}
