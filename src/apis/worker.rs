//! Worker pool provider configuration (`spec.provider.workers[].providerConfig`).

use super::cloudprofile::ImageReference;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfig {
    /// Capacity advertised for scale-from-zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_template: Option<NodeTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics_profile: Option<DiagnosticsProfile>,
    /// Per data volume settings, matched by name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_volumes: Vec<DataVolumeConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    #[serde(default)]
    #[schemars(with = "BTreeMap<String, String>")]
    pub capacity: BTreeMap<String, Quantity>,
}

/// Boot diagnostics of the pool's machines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsProfile {
    #[serde(default)]
    pub enabled: bool,
    /// Storage account for diagnostics; managed storage when unset
    #[serde(rename = "storageURI", default, skip_serializing_if = "Option::is_none")]
    pub storage_uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataVolumeConfig {
    pub name: String,
    /// Image the data volume is created from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageReference>,
}
