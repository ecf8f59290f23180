//! Workload identity provider configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Federated Azure identity a workload identity maps to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WorkloadIdentityConfig {
    #[serde(rename = "clientID", default)]
    pub client_id: String,
    #[serde(rename = "tenantID", default)]
    pub tenant_id: String,
    #[serde(rename = "subscriptionID", default)]
    pub subscription_id: String,
}
