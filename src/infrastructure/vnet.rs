//! Virtual network stanza of the infrastructure config.

use super::ClusterCidrs;
use crate::apis::{InfrastructureConfig, NetworkLayout, VNet, VnetShape};
use crate::constants::DDOS_PROTECTION_PLAN_RESOURCE_TYPE;
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use crate::validation::{
    validate_resource_group_name, validate_resource_id, validate_vnet_name, Cidr,
};

/// Validate `networks.vnet` for the given layout
///
/// `subnets` are the worker subnet (single-subnet) or the zone subnets
/// (multi-subnet) that a managed vnet range must contain.
pub(super) fn validate_vnet(
    infra: &InfrastructureConfig,
    layout: NetworkLayout,
    cluster: &ClusterCidrs,
    subnets: &[&Cidr],
    path: &FieldPath,
) -> ErrorList {
    let vnet = &infra.networks.vnet;
    let mut errors = ErrorList::new();

    match vnet.shape() {
        VnetShape::Incomplete => {
            errors.push(FieldError::invalid(
                path,
                BadValue::of(vnet),
                "a vnet name and resource group must be specified together",
            ));
            return errors;
        }
        VnetShape::External => errors.append(validate_external_vnet(infra, vnet, path)),
        VnetShape::Managed => errors.append(validate_managed_vnet(vnet, cluster, subnets, path)),
        VnetShape::Default => {
            if layout == NetworkLayout::MultiSubnet {
                errors.push(FieldError::forbidden(
                    &path.child("cidr"),
                    "a vnet cidr or a reference to an existing vnet must be specified when using zones",
                ));
            }
        }
    }

    if vnet.shape() != VnetShape::External {
        if let Some(plan) = &vnet.ddos_protection_plan_id {
            errors.append(validate_resource_id(
                plan,
                Some(DDOS_PROTECTION_PLAN_RESOURCE_TYPE),
                &path.child("ddosProtectionPlanID"),
            ));
        }
    }
    errors
}

fn validate_external_vnet(infra: &InfrastructureConfig, vnet: &VNet, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();
    let name = vnet.name.as_deref().unwrap_or_default();
    let resource_group = vnet.resource_group.as_deref().unwrap_or_default();

    errors.append(validate_vnet_name(name, &path.child("name")));
    errors.append(validate_resource_group_name(
        resource_group,
        &path.child("resourceGroup"),
    ));

    if vnet.cidr.is_some() {
        errors.push(FieldError::forbidden(
            &path.child("cidr"),
            "a vnet cidr cannot be specified when referencing an existing vnet",
        ));
    }
    if vnet.ddos_protection_plan_id.is_some() {
        errors.push(FieldError::forbidden(
            &path.child("ddosProtectionPlanID"),
            "a DDoS protection plan cannot be attached to an existing vnet",
        ));
    }
    if infra
        .resource_group
        .as_ref()
        .is_some_and(|rg| rg.name == resource_group)
    {
        errors.push(FieldError::invalid(
            &path.child("resourceGroup"),
            BadValue::of(&resource_group),
            "the vnet resource group must not be the same as the cluster resource group",
        ));
    }
    errors
}

fn validate_managed_vnet(
    vnet: &VNet,
    cluster: &ClusterCidrs,
    subnets: &[&Cidr],
    path: &FieldPath,
) -> ErrorList {
    let Some(raw) = vnet.cidr.as_deref() else {
        return ErrorList::new();
    };
    let cidr = Cidr::new(raw, &path.child("cidr"));

    let mut errors = cidr.validate();
    if let Some(nodes) = &cluster.nodes {
        errors.append(cidr.covers(&[nodes]));
    }
    errors.append(cidr.covers(subnets));
    errors.append(cidr.disjoint_from(&cluster.pods_and_services()));
    errors
}
