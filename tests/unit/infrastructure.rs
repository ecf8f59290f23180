//! # Infrastructure Config Tests
//!
//! Layout, vnet and NAT gateway rules, and update transitions.

use crate::common::{from_yaml, init_tracing, sig};
use azure_provider_validation::apis::InfrastructureConfig;
use azure_provider_validation::field::{ErrorKind, ErrorList, FieldPath};
use azure_provider_validation::infrastructure::{
    validate_infrastructure_config, validate_infrastructure_config_update, InfrastructureContext,
};

fn ctx() -> InfrastructureContext {
    InfrastructureContext {
        nodes: Some("10.250.0.0/16".to_string()),
        pods: Some("100.96.0.0/11".to_string()),
        services: Some("100.64.0.0/13".to_string()),
        legacy_availability_set: false,
    }
}

fn validate(yaml: &str) -> ErrorList {
    init_tracing();
    let infra: InfrastructureConfig = from_yaml(yaml);
    validate_infrastructure_config(&infra, &ctx(), &FieldPath::root())
}

#[test]
fn test_single_subnet_valid() {
    let errors = validate(
        r"
zoned: true
networks:
  workers: 10.250.0.0/19
  natGateway:
    enabled: true
    idleConnectionTimeoutMinutes: 30
  serviceEndpoints:
  - Microsoft.Storage
",
    );
    assert!(errors.is_empty(), "{errors}");
}

#[test]
fn test_workers_and_zones_together() {
    let errors = validate(
        r"
zoned: true
networks:
  workers: 10.250.0.0/19
  zones:
  - name: 1
    cidr: 10.250.0.0/19
",
    );
    assert_eq!(
        errors.signature(),
        sig(&[(ErrorKind::Forbidden, "networks.workers")])
    );
}

#[test]
fn test_neither_workers_nor_zones() {
    let errors = validate("zoned: true\nnetworks: {}\n");
    assert_eq!(errors.signature(), sig(&[(ErrorKind::Forbidden, "networks")]));
}

#[test]
fn test_workers_outside_nodes_and_overlapping_pods() {
    let errors = validate(
        r"
networks:
  workers: 100.96.0.0/16
",
    );
    assert_eq!(
        errors.signature(),
        sig(&[
            (ErrorKind::Invalid, "networks.workers"),
            (ErrorKind::Invalid, "networks.workers"),
        ])
    );
}

#[test]
fn test_nat_gateway_timeout_out_of_range() {
    let errors = validate(
        r"
zoned: true
networks:
  workers: 10.250.0.0/19
  natGateway:
    enabled: true
    idleConnectionTimeoutMinutes: 121
",
    );
    assert_eq!(
        errors.signature(),
        sig(&[(
            ErrorKind::Invalid,
            "networks.natGateway.idleConnectionTimeoutMinutes"
        )])
    );
}

#[test]
fn test_nat_gateway_requires_zoned_or_legacy_cluster() {
    let yaml = r"
networks:
  workers: 10.250.0.0/19
  natGateway:
    enabled: true
";
    assert_eq!(
        validate(yaml).signature(),
        sig(&[(ErrorKind::Forbidden, "networks.natGateway")])
    );

    let infra: InfrastructureConfig = from_yaml(yaml);
    let legacy = InfrastructureContext {
        legacy_availability_set: true,
        ..ctx()
    };
    assert!(validate_infrastructure_config(&infra, &legacy, &FieldPath::root()).is_empty());
}

#[test]
fn test_external_vnet_rejects_cidr() {
    let errors = validate(
        r"
resourceGroup:
  name: shoot-rg
zoned: true
networks:
  vnet:
    name: shared-vnet
    resourceGroup: shoot-rg
    cidr: 10.0.0.0/8
  workers: 10.250.0.0/19
",
    );
    assert_eq!(
        errors.signature(),
        sig(&[
            (ErrorKind::Invalid, "networks.vnet.resourceGroup"),
            (ErrorKind::Invalid, "resourceGroup"),
            (ErrorKind::Forbidden, "networks.vnet.cidr"),
        ])
    );
}

#[test]
fn test_managed_vnet_must_contain_workers() {
    let errors = validate(
        r"
zoned: true
networks:
  vnet:
    cidr: 10.250.0.0/20
  workers: 10.250.0.0/19
",
    );
    // neither the nodes range nor the workers subnet fit
    assert_eq!(
        errors.signature(),
        sig(&[
            (ErrorKind::Invalid, "networks.vnet.cidr"),
            (ErrorKind::Invalid, "networks.vnet.cidr"),
        ])
    );
}

#[test]
fn test_vnet_name_without_resource_group() {
    let errors = validate(
        r"
zoned: true
networks:
  vnet:
    name: shared-vnet
    cidr: not-a-cidr
  workers: 10.250.0.0/19
",
    );
    // the incomplete reference disables the remaining vnet checks
    assert_eq!(errors.signature(), sig(&[(ErrorKind::Invalid, "networks.vnet")]));
}

#[test]
fn test_update_layout_migration() {
    init_tracing();
    let old: InfrastructureConfig = from_yaml(
        r"
zoned: true
networks:
  vnet:
    cidr: 10.250.0.0/16
  workers: 10.250.0.0/19
",
    );
    let anchored: InfrastructureConfig = from_yaml(
        r"
zoned: true
networks:
  vnet:
    cidr: 10.250.0.0/16
  zones:
  - name: 1
    cidr: 10.250.0.0/19
  - name: 2
    cidr: 10.250.32.0/19
",
    );
    let unanchored: InfrastructureConfig = from_yaml(
        r"
zoned: true
networks:
  vnet:
    cidr: 10.250.0.0/16
  zones:
  - name: 1
    cidr: 10.250.64.0/19
",
    );
    let path = FieldPath::root();
    assert!(validate_infrastructure_config_update(&old, &anchored, &path).is_empty());
    assert_eq!(
        validate_infrastructure_config_update(&old, &unanchored, &path).signature(),
        sig(&[(ErrorKind::Forbidden, "networks.zones")])
    );
    assert_eq!(
        validate_infrastructure_config_update(&anchored, &old, &path).signature(),
        sig(&[(ErrorKind::Forbidden, "networks.workers")])
    );
}

#[test]
fn test_update_zoned_is_immutable() {
    init_tracing();
    let zoned: InfrastructureConfig = from_yaml("zoned: true\nnetworks:\n  workers: 10.250.0.0/19\n");
    let regional: InfrastructureConfig = from_yaml("zoned: false\nnetworks:\n  workers: 10.250.0.0/19\n");
    let path = FieldPath::root();
    for (old, new) in [(&zoned, &regional), (&regional, &zoned)] {
        assert_eq!(
            validate_infrastructure_config_update(old, new, &path).signature(),
            sig(&[(ErrorKind::Invalid, "zoned")])
        );
    }
}
