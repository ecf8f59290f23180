//! # Infrastructure
//!
//! Validation of the Azure infrastructure config: resource group, identity,
//! virtual network, subnet layout (single worker subnet or one subnet per
//! zone), NAT gateways and their cross-field constraints against the
//! shoot's node, pod and service ranges.

mod nat;
mod update;
mod vnet;
mod zones;

pub use update::validate_infrastructure_config_update;

use crate::apis::{InfrastructureConfig, NetworkLayout};
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use crate::validation::{optional_cidr, validate_resource_group_name, validate_resource_name, Cidr};
use tracing::trace;

/// Shoot-level facts the infrastructure config is validated against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfrastructureContext {
    /// `spec.networking.nodes`
    pub nodes: Option<String>,
    /// `spec.networking.pods`
    pub pods: Option<String>,
    /// `spec.networking.services`
    pub services: Option<String>,
    /// Cluster still runs on legacy availability sets (VMO)
    pub legacy_availability_set: bool,
}

/// Shoot networking ranges as [`Cidr`]s located under `networking`
#[derive(Debug, Clone, Default)]
pub(crate) struct ClusterCidrs {
    pub(crate) nodes: Option<Cidr>,
    pub(crate) pods: Option<Cidr>,
    pub(crate) services: Option<Cidr>,
}

impl ClusterCidrs {
    pub(crate) fn new(nodes: Option<&str>, pods: Option<&str>, services: Option<&str>) -> Self {
        let networking = FieldPath::new("networking");
        Self {
            nodes: optional_cidr(nodes, &networking.child("nodes")),
            pods: optional_cidr(pods, &networking.child("pods")),
            services: optional_cidr(services, &networking.child("services")),
        }
    }

    pub(crate) fn pods_and_services(&self) -> Vec<&Cidr> {
        self.pods.iter().chain(self.services.iter()).collect()
    }
}

impl From<&InfrastructureContext> for ClusterCidrs {
    fn from(ctx: &InfrastructureContext) -> Self {
        Self::new(
            ctx.nodes.as_deref(),
            ctx.pods.as_deref(),
            ctx.services.as_deref(),
        )
    }
}

/// Validate an infrastructure config
pub fn validate_infrastructure_config(
    infra: &InfrastructureConfig,
    ctx: &InfrastructureContext,
    path: &FieldPath,
) -> ErrorList {
    trace!(zoned = infra.zoned, "Validating infrastructure config");
    let mut errors = ErrorList::new();

    if let Some(resource_group) = &infra.resource_group {
        errors.push(FieldError::invalid(
            &path.child("resourceGroup"),
            BadValue::of(resource_group),
            "specifying an existing resource group is not supported",
        ));
    }
    if let Some(identity) = &infra.identity {
        let identity_path = path.child("identity");
        if identity.name.is_empty() || identity.resource_group.is_empty() {
            errors.push(FieldError::invalid(
                &identity_path,
                BadValue::of(identity),
                "specifying an identity requires the name of the identity and the resource group which hosts it",
            ));
        } else {
            errors.append(validate_resource_name(&identity.name, &identity_path.child("name")));
            errors.append(validate_resource_group_name(
                &identity.resource_group,
                &identity_path.child("resourceGroup"),
            ));
        }
    }

    let networks = &infra.networks;
    let networks_path = path.child("networks");
    let Some(layout) = networks.layout() else {
        if networks.workers.is_some() {
            errors.push(FieldError::forbidden(
                &networks_path.child("workers"),
                "workers and zones cannot be specified at the same time",
            ));
        } else {
            errors.push(FieldError::forbidden(
                &networks_path,
                "either workers or zones must be specified",
            ));
        }
        return errors;
    };

    let cluster = ClusterCidrs::from(ctx);

    let subnets = match layout {
        NetworkLayout::SingleSubnet => {
            let workers = Cidr::new(
                networks.workers.clone().unwrap_or_default(),
                &networks_path.child("workers"),
            );
            errors.append(workers.validate());
            if let Some(nodes) = &cluster.nodes {
                errors.append(workers.within(&[nodes]));
            }
            errors.append(workers.disjoint_from(&cluster.pods_and_services()));

            if let Some(nat) = &networks.nat_gateway {
                errors.append(nat::validate_nat_gateway(
                    nat,
                    infra.zoned || ctx.legacy_availability_set,
                    &networks_path.child("natGateway"),
                ));
            }
            vec![workers]
        }
        NetworkLayout::MultiSubnet => {
            let zones_path = networks_path.child("zones");
            if !infra.zoned {
                errors.push(FieldError::forbidden(
                    &zones_path,
                    "zones can only be specified for zoned clusters",
                ));
            }
            let cidrs = zones::zone_cidrs(&networks.zones, &zones_path);
            errors.append(zones::validate_zones(&networks.zones, &cidrs, &cluster, &zones_path));

            if networks.nat_gateway.is_some() {
                errors.push(FieldError::forbidden(
                    &networks_path.child("natGateway"),
                    "a NAT gateway must be configured per zone when using zones",
                ));
            }
            if !networks.service_endpoints.is_empty() {
                errors.push(FieldError::forbidden(
                    &networks_path.child("serviceEndpoints"),
                    "service endpoints must be configured per zone when using zones",
                ));
            }
            cidrs
        }
    };

    let subnet_refs: Vec<&Cidr> = subnets.iter().collect();
    errors.append(vnet::validate_vnet(
        infra,
        layout,
        &cluster,
        &subnet_refs,
        &networks_path.child("vnet"),
    ));
    errors
}
