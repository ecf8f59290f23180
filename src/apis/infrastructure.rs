//! Infrastructure provider configuration (`spec.provider.infrastructureConfig`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Azure infrastructure configuration of a shoot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureConfig {
    /// Existing resource group to deploy into (not supported)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<ResourceGroup>,
    #[serde(default)]
    pub networks: NetworkConfig,
    /// Managed identity attached to the cluster's machines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityConfig>,
    /// Whether machines are spread across availability zones
    #[serde(default)]
    pub zoned: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityConfig {
    pub name: String,
    pub resource_group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acr_access: Option<bool>,
}

/// Network layout of the infrastructure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    #[serde(default)]
    pub vnet: VNet,
    /// Worker subnet CIDR (single-subnet layout)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<String>,
    /// Per-zone subnets (multi-subnet layout)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_gateway: Option<NatGatewayConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_endpoints: Vec<String>,
}

/// Subnet layout selected by a [`NetworkConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkLayout {
    /// One shared worker subnet (`networks.workers`)
    SingleSubnet,
    /// One subnet per availability zone (`networks.zones`)
    MultiSubnet,
}

impl NetworkConfig {
    /// Layout, or `None` when both or neither of workers and zones are set
    #[must_use]
    pub fn layout(&self) -> Option<NetworkLayout> {
        match (self.workers.is_some(), self.zones.is_empty()) {
            (true, true) => Some(NetworkLayout::SingleSubnet),
            (false, false) => Some(NetworkLayout::MultiSubnet),
            _ => None,
        }
    }
}

/// Virtual network reference or definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VNet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    #[serde(
        rename = "ddosProtectionPlanID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ddos_protection_plan_id: Option<String>,
}

/// Shape of a [`VNet`] stanza
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VnetShape {
    /// Nothing set; a vnet is created from the worker or zone CIDRs
    Default,
    /// Only `cidr` (and optionally a DDoS plan) set; a vnet is created with that range
    Managed,
    /// `name` and `resourceGroup` reference an existing vnet
    External,
    /// Exactly one of `name` and `resourceGroup`
    Incomplete,
}

impl VNet {
    #[must_use]
    pub fn shape(&self) -> VnetShape {
        match (&self.name, &self.resource_group) {
            (Some(_), Some(_)) => VnetShape::External,
            (Some(_), None) | (None, Some(_)) => VnetShape::Incomplete,
            (None, None) if self.cidr.is_some() => VnetShape::Managed,
            (None, None) => VnetShape::Default,
        }
    }
}

/// Subnet of one availability zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub name: i32,
    pub cidr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_gateway: Option<ZonedNatGatewayConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_endpoints: Vec<String>,
}

/// NAT gateway of the single worker subnet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NatGatewayConfig {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_connection_timeout_minutes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_addresses: Vec<PublicIpReference>,
}

/// NAT gateway of a zone subnet; the zone is implied by the subnet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZonedNatGatewayConfig {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_connection_timeout_minutes: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_addresses: Vec<ZonedPublicIpReference>,
}

/// Existing public IP attached to a NAT gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicIpReference {
    pub name: String,
    pub resource_group: String,
    pub zone: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZonedPublicIpReference {
    pub name: String,
    pub resource_group: String,
}
