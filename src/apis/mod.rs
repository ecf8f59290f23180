//! # APIs
//!
//! Typed Azure provider configuration and the orchestrator resources that
//! embed it. Field names follow the JSON wire format (camelCase, with the
//! `...ID` spellings Azure uses).

pub mod backupbucket;
pub mod cloudprofile;
pub mod controlplane;
pub mod duration;
pub mod infrastructure;
pub mod resources;
pub mod worker;
pub mod workloadidentity;

pub use backupbucket::{
    BackupBucketConfig, CloudConfiguration, ImmutableConfig, RetentionLock, RotationConfig,
};
pub use cloudprofile::{
    CloudProfileConfig, DomainCount, GenericMachineImage, GenericMachineImageVersion,
    ImageReference, MachineImageVersion, MachineImages,
};
pub use controlplane::{CloudControllerManagerConfig, ControlPlaneConfig, Storage};
pub use duration::MetaDuration;
pub use infrastructure::{
    IdentityConfig, InfrastructureConfig, NatGatewayConfig, NetworkConfig, NetworkLayout,
    PublicIpReference, ResourceGroup, VNet, VnetShape, Zone, ZonedNatGatewayConfig,
    ZonedPublicIpReference,
};
pub use resources::{
    BackupBucket, BackupBucketSpec, BackupProvider, CloudProfile, CloudProfileSpec, Kubernetes,
    Machine, Networking, Provider, Shoot, ShootSpec, TargetSystem, Volume, Worker,
    WorkloadIdentity, WorkloadIdentitySpec,
};
pub use worker::{DataVolumeConfig, DiagnosticsProfile, NodeTemplate, WorkerConfig};
pub use workloadidentity::WorkloadIdentityConfig;
