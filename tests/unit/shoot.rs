//! # Shoot Tests
//!
//! Whole-shoot validation through the admission facade.

use crate::common::{from_yaml, init_tracing, raw_yaml, sig};
use azure_provider_validation::admission::AdmissionValidator;
use azure_provider_validation::apis::Shoot;
use azure_provider_validation::field::ErrorKind;

const SHOOT: &str = r"
metadata:
  namespace: garden-dev
  name: multi-zone
spec:
  region: westeurope
  kubernetes:
    version: 1.30.2
  networking:
    type: cilium
    nodes: 10.250.0.0/16
    pods: 100.96.0.0/11
    services: 100.64.0.0/13
  provider:
    type: azure
    infrastructureConfig:
      apiVersion: azure.provider.extensions.gardener.cloud/v1alpha1
      kind: InfrastructureConfig
      zoned: true
      networks:
        vnet:
          cidr: 10.250.0.0/16
        zones:
        - name: 1
          cidr: 10.250.0.0/19
          natGateway:
            enabled: true
        - name: 2
          cidr: 10.250.32.0/19
    controlPlaneConfig:
      apiVersion: azure.provider.extensions.gardener.cloud/v1alpha1
      kind: ControlPlaneConfig
      cloudControllerManager:
        featureGates:
          RotateKubeletServerCertificate: true
    workers:
    - name: cpu-worker
      machine:
        type: Standard_D4_v3
      volume:
        type: StandardSSD_LRS
        size: 50Gi
      dataVolumes:
      - name: data
        type: Standard_LRS
        size: 100Gi
      zones:
      - '1'
      - '2'
      providerConfig:
        apiVersion: azure.provider.extensions.gardener.cloud/v1alpha1
        kind: WorkerConfig
        nodeTemplate:
          capacity:
            cpu: '4'
            memory: 16Gi
        diagnosticsProfile:
          enabled: true
        dataVolumes:
        - name: data
";

fn shoot() -> Shoot {
    init_tracing();
    from_yaml(SHOOT)
}

#[test]
fn test_multi_zone_shoot_is_valid() {
    let errors = AdmissionValidator::default().validate_shoot(&shoot(), None);
    assert!(errors.is_empty(), "{errors}");
}

#[test]
fn test_worker_zone_missing_from_infrastructure() {
    let mut s = shoot();
    s.spec.provider.workers[0].zones.push("3".to_string());
    let errors = AdmissionValidator::default().validate_shoot(&s, None);
    assert_eq!(
        errors.signature(),
        sig(&[(ErrorKind::Invalid, "spec.provider.workers[0].zones[2]")])
    );
}

#[test]
fn test_unknown_feature_gate_for_version() {
    let mut s = shoot();
    s.spec.provider.control_plane_config = Some(raw_yaml(
        r"
cloudControllerManager:
  featureGates:
    LoadBalancerIPMode: true
",
    ));
    s.spec.kubernetes.version = "1.28.5".to_string();
    let errors = AdmissionValidator::default().validate_shoot(&s, None);
    assert_eq!(
        errors.signature(),
        sig(&[(
            ErrorKind::Forbidden,
            "spec.provider.controlPlaneConfig.cloudControllerManager.featureGates[LoadBalancerIPMode]"
        )])
    );
}

#[test]
fn test_update_rules() {
    let old = shoot();

    // appending a zone to the pool and a zone to the infrastructure is fine
    let mut grown = shoot();
    grown.spec.provider.infrastructure_config = Some(raw_yaml(
        r"
zoned: true
networks:
  vnet:
    cidr: 10.250.0.0/16
  zones:
  - name: 1
    cidr: 10.250.0.0/19
    natGateway:
      enabled: true
  - name: 2
    cidr: 10.250.32.0/19
  - name: 3
    cidr: 10.250.64.0/19
",
    ));
    grown.spec.provider.workers[0].zones.push("3".to_string());
    let validator = AdmissionValidator::default();
    let errors = validator.validate_shoot(&grown, Some(&old));
    assert!(errors.is_empty(), "{errors}");

    // reordering pool zones and dropping an infrastructure zone is not
    let mut shrunk = shoot();
    shrunk.spec.provider.infrastructure_config = Some(raw_yaml(
        r"
zoned: true
networks:
  vnet:
    cidr: 10.250.0.0/16
  zones:
  - name: 2
    cidr: 10.250.32.0/19
",
    ));
    shrunk.spec.provider.workers[0].zones = vec!["2".to_string()];
    let errors = validator.validate_shoot(&shrunk, Some(&old));
    assert_eq!(
        errors.signature(),
        sig(&[
            (ErrorKind::Invalid, "spec.provider.workers[0].zones"),
            (
                ErrorKind::Forbidden,
                "spec.provider.infrastructureConfig.networks.zones"
            ),
        ])
    );
}
