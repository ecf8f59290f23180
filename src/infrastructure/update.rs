//! Update rules of the infrastructure config.

use crate::apis::{InfrastructureConfig, NetworkConfig, NetworkLayout, VnetShape};
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use tracing::trace;

/// Validate an infrastructure config update against the previous config
///
/// Covers immutable fields, network layout transitions and vnet stability.
/// The new config's own consistency is checked by
/// [`super::validate_infrastructure_config`].
pub fn validate_infrastructure_config_update(
    old: &InfrastructureConfig,
    new: &InfrastructureConfig,
    path: &FieldPath,
) -> ErrorList {
    trace!("Validating infrastructure config update");
    let mut errors = ErrorList::new();

    if old.resource_group != new.resource_group {
        errors.push(FieldError::immutable(
            &path.child("resourceGroup"),
            BadValue::of(&new.resource_group),
        ));
    }
    if old.zoned != new.zoned {
        errors.push(FieldError::immutable(&path.child("zoned"), BadValue::of(&new.zoned)));
    }

    let networks_path = path.child("networks");
    errors.append(validate_layout_transition(
        &old.networks,
        &new.networks,
        &networks_path,
    ));
    errors.append(validate_vnet_update(
        &old.networks,
        &new.networks,
        &networks_path.child("vnet"),
    ));
    errors
}

fn validate_layout_transition(old: &NetworkConfig, new: &NetworkConfig, path: &FieldPath) -> ErrorList {
    let (Some(old_layout), Some(new_layout)) = (old.layout(), new.layout()) else {
        // an ambiguous layout is reported by create validation
        return ErrorList::new();
    };

    let workers_path = path.child("workers");
    let zones_path = path.child("zones");
    match (old_layout, new_layout) {
        (NetworkLayout::SingleSubnet, NetworkLayout::SingleSubnet) => {
            if old.workers == new.workers {
                ErrorList::new()
            } else {
                FieldError::immutable(&workers_path, BadValue::of(&new.workers)).into()
            }
        }
        (NetworkLayout::MultiSubnet, NetworkLayout::SingleSubnet) => FieldError::forbidden(
            &workers_path,
            "updating the network layout from zones to a single worker subnet is not allowed",
        )
        .into(),
        (NetworkLayout::SingleSubnet, NetworkLayout::MultiSubnet) => {
            let anchored = new
                .zones
                .iter()
                .any(|zone| old.workers.as_deref() == Some(zone.cidr.as_str()));
            if anchored {
                ErrorList::new()
            } else {
                FieldError::forbidden(
                    &zones_path,
                    format!(
                        "when migrating to zones, one zone must use the existing workers CIDR ({})",
                        old.workers.as_deref().unwrap_or_default()
                    ),
                )
                .into()
            }
        }
        (NetworkLayout::MultiSubnet, NetworkLayout::MultiSubnet) => {
            let mut errors = ErrorList::new();
            for old_zone in &old.zones {
                match new.zones.iter().position(|z| z.name == old_zone.name) {
                    None => errors.push(FieldError::forbidden(
                        &zones_path,
                        format!("zone {} cannot be removed", old_zone.name),
                    )),
                    Some(i) if new.zones[i].cidr != old_zone.cidr => {
                        errors.push(FieldError::immutable(
                            &zones_path.index(i).child("cidr"),
                            BadValue::of(&new.zones[i].cidr),
                        ));
                    }
                    Some(_) => {}
                }
            }
            errors
        }
    }
}

fn validate_vnet_update(old: &NetworkConfig, new: &NetworkConfig, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();
    match old.vnet.shape() {
        VnetShape::External | VnetShape::Default => {
            if old.vnet.name != new.vnet.name {
                errors.push(FieldError::immutable(
                    &path.child("name"),
                    BadValue::of(&new.vnet.name),
                ));
            }
            if old.vnet.resource_group != new.vnet.resource_group {
                errors.push(FieldError::immutable(
                    &path.child("resourceGroup"),
                    BadValue::of(&new.vnet.resource_group),
                ));
            }
        }
        VnetShape::Managed => {
            if new.vnet.cidr.is_none() {
                errors.push(FieldError::required(
                    &path.child("cidr"),
                    "the vnet cidr cannot be removed",
                ));
            }
        }
        VnetShape::Incomplete => {}
    }
    errors
}
