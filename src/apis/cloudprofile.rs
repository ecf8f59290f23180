//! Cloud profile provider configuration and the provider-neutral image catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Azure-specific part of a cloud profile (`spec.providerConfig`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudProfileConfig {
    #[serde(default)]
    pub count_update_domains: Vec<DomainCount>,
    #[serde(default)]
    pub count_fault_domains: Vec<DomainCount>,
    #[serde(default)]
    pub machine_images: Vec<MachineImages>,
}

/// Number of fault or update domains in a region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainCount {
    pub region: String,
    pub count: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineImages {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<MachineImageVersion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineImageVersion {
    pub version: String,
    #[serde(flatten)]
    pub image: ImageReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accelerated_networking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_marketplace_agreement: Option<bool>,
}

/// One of four mutually exclusive ways to name a VM image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageReference {
    /// Marketplace `Publisher:Offer:Sku:Version`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urn: Option<String>,
    /// ARM resource id of an image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        rename = "sharedGalleryImageID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub shared_gallery_image_id: Option<String>,
    #[serde(
        rename = "communityGalleryImageID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub community_gallery_image_id: Option<String>,
}

impl ImageReference {
    /// Number of reference kinds set
    #[must_use]
    pub fn count(&self) -> usize {
        [
            &self.urn,
            &self.id,
            &self.shared_gallery_image_id,
            &self.community_gallery_image_id,
        ]
        .iter()
        .filter(|r| r.is_some())
        .count()
    }
}

/// Image of the provider-neutral catalog (`spec.machineImages` of a cloud profile)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenericMachineImage {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<GenericMachineImageVersion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenericMachineImageVersion {
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub architectures: Vec<String>,
}
