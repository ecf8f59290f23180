//! # Provider Config Decoding Tests
//!
//! Catches schema drift in the typed provider configs: every field can be
//! decoded from the manifests users write.

use crate::common::{from_yaml, raw_yaml};
use azure_provider_validation::admission::{decode_provider_config, DecodeError};
use azure_provider_validation::apis::{
    BackupBucketConfig, CloudProfileConfig, InfrastructureConfig, NetworkLayout, RetentionLock,
    VnetShape, WorkerConfig,
};

#[test]
fn test_infrastructure_config_all_fields() {
    let infra: InfrastructureConfig = from_yaml(
        r"
apiVersion: azure.provider.extensions.gardener.cloud/v1alpha1
kind: InfrastructureConfig
resourceGroup:
  name: my-rg
identity:
  name: my-identity
  resourceGroup: identity-rg
  acrAccess: true
zoned: true
networks:
  vnet:
    name: my-vnet
    resourceGroup: vnet-rg
  workers: 10.250.0.0/19
  serviceEndpoints:
  - Microsoft.Storage
  natGateway:
    enabled: true
    idleConnectionTimeoutMinutes: 4
    zone: 1
    ipAddresses:
    - name: my-ip
      resourceGroup: ip-rg
      zone: 1
",
    );
    assert_eq!(infra.networks.layout(), Some(NetworkLayout::SingleSubnet));
    assert_eq!(infra.networks.vnet.shape(), VnetShape::External);
    let nat = infra.networks.nat_gateway.as_ref().expect("nat gateway");
    assert_eq!(nat.zone, Some(1));
    assert_eq!(nat.ip_addresses[0].name, "my-ip");
    assert!(infra.identity.as_ref().is_some_and(|identity| identity.acr_access == Some(true)));
}

#[test]
fn test_backup_bucket_config_durations() {
    let config: BackupBucketConfig = from_yaml(
        r"
immutability:
  retentionType: bucket
  retentionPeriod: 1h30m
  locked: true
rotationConfig:
  rotationPeriodDays: 2
  expirationPeriodDays: 10
cloudConfiguration:
  name: AzurePublic
",
    );
    assert_eq!(config.retention_lock(), RetentionLock::Locked);
    let json = serde_json::to_value(&config).expect("serialize");
    assert_eq!(json["immutability"]["retentionPeriod"], "1h30m0s");
}

#[test]
fn test_cloud_profile_image_references() {
    let config: CloudProfileConfig = from_yaml(
        r"
machineImages:
- name: ubuntu
  versions:
  - version: 22.4.0
    urn: Canonical:0001-com-ubuntu-server-jammy:22_04-lts-gen2:22.04.202401010
    acceleratedNetworking: true
  - version: 22.4.1
    sharedGalleryImageID: /SharedGalleries/gallery/Images/ubuntu/Versions/22.4.1
    architecture: arm64
",
    );
    let versions = &config.machine_images[0].versions;
    assert_eq!(versions[0].image.count(), 1);
    assert!(versions[0].image.urn.is_some());
    assert_eq!(versions[1].architecture.as_deref(), Some("arm64"));
    assert!(versions[1].image.shared_gallery_image_id.is_some());
}

#[test]
fn test_worker_config_quantities() {
    let config: WorkerConfig = decode_provider_config(
        &raw_yaml(
            r"
nodeTemplate:
  capacity:
    cpu: '2'
    nvidia.com/gpu: '1'
diagnosticsProfile:
  enabled: true
  storageURI: https://diag.blob.core.windows.net/
",
        ),
        "WorkerConfig",
    )
    .expect("decodes");
    let capacity = &config.node_template.as_ref().expect("node template").capacity;
    assert_eq!(capacity["nvidia.com/gpu"].0, "1");
}

#[test]
fn test_decode_error_kind() {
    let err = decode_provider_config::<InfrastructureConfig>(&raw_yaml("zoned: maybe"), "InfrastructureConfig")
        .expect_err("zoned must be a bool");
    assert!(matches!(
        err.downcast_ref::<DecodeError>(),
        Some(DecodeError::Malformed { kind: "InfrastructureConfig", .. })
    ));
}
