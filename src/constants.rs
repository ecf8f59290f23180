//! # Constants
//!
//! Shared constants used throughout the validators.
//!
//! These values mirror the limits Azure and the provider extension impose on
//! user-supplied configuration.

/// Provider type handled by this extension
pub const PROVIDER_TYPE: &str = "azure";

/// Minimum NAT gateway idle connection timeout (minutes)
pub const NAT_GATEWAY_MIN_IDLE_TIMEOUT_MINUTES: i32 = 4;

/// Maximum NAT gateway idle connection timeout (minutes)
pub const NAT_GATEWAY_MAX_IDLE_TIMEOUT_MINUTES: i32 = 120;

/// Maximum number of data volumes per worker pool
pub const MAX_DATA_VOLUMES: usize = 64;

/// Minimum rotation period for backup bucket keys (days)
pub const MIN_ROTATION_PERIOD_DAYS: i32 = 2;

/// Granularity of immutable retention periods (hours)
pub const RETENTION_PERIOD_GRANULARITY_HOURS: i64 = 24;

/// Only retention type supported by Azure immutable blob storage policies
pub const RETENTION_TYPE_BUCKET: &str = "bucket";

/// Architecture assumed when a machine image version omits it
pub const DEFAULT_ARCHITECTURE: &str = "amd64";

/// Machine architectures supported by Azure images
pub const SUPPORTED_ARCHITECTURES: &[&str] = &["amd64", "arm64"];

/// Azure cloud instances
pub const AZURE_CLOUD_PUBLIC: &str = "AzurePublic";
pub const AZURE_CLOUD_CHINA: &str = "AzureChina";
pub const AZURE_CLOUD_GOVERNMENT: &str = "AzureGovernment";

/// All supported Azure cloud instances
pub const SUPPORTED_AZURE_CLOUDS: &[&str] =
    &[AZURE_CLOUD_PUBLIC, AZURE_CLOUD_CHINA, AZURE_CLOUD_GOVERNMENT];

/// CNI that supports an overlay network which Azure cannot route
pub const OVERLAY_NETWORKING_TYPE: &str = "calico";

/// IP families accepted for Azure shoots
pub const SUPPORTED_IP_FAMILIES: &[&str] = &["IPv4"];

/// Annotation marking clusters that still run on legacy availability sets (VMO)
pub const LEGACY_AVAILABILITY_SET_ANNOTATION: &str =
    "alpha.azure.provider.extensions.gardener.cloud/vmo";

/// ARM resource type of DDoS protection plans
pub const DDOS_PROTECTION_PLAN_RESOURCE_TYPE: &str = "Microsoft.Network/ddosProtectionPlans";

/// Maximum length of an Azure resource group name
pub const MAX_RESOURCE_GROUP_NAME_LENGTH: usize = 90;

/// Length limits of an Azure virtual network name
pub const MIN_VNET_NAME_LENGTH: usize = 2;
pub const MAX_VNET_NAME_LENGTH: usize = 64;

/// Length limits of a generic Azure resource name (public IPs, identities)
pub const MAX_RESOURCE_NAME_LENGTH: usize = 80;
