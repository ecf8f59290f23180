//! NAT gateway stanzas: the shared one of the single worker subnet and the
//! per-zone ones of the multi-subnet layout.

use crate::apis::{NatGatewayConfig, PublicIpReference, ZonedNatGatewayConfig, ZonedPublicIpReference};
use crate::constants::{NAT_GATEWAY_MAX_IDLE_TIMEOUT_MINUTES, NAT_GATEWAY_MIN_IDLE_TIMEOUT_MINUTES};
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use crate::validation::{validate_resource_group_name, validate_resource_name};

/// Validate `networks.natGateway` of a single-subnet layout
///
/// `zonal_capable` is true for zoned clusters and for clusters still
/// running on legacy availability sets.
pub(super) fn validate_nat_gateway(
    nat: &NatGatewayConfig,
    zonal_capable: bool,
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();

    if !nat.enabled {
        errors.append(forbid_when_disabled(
            nat.idle_connection_timeout_minutes.is_some(),
            nat.zone.is_some(),
            !nat.ip_addresses.is_empty(),
            path,
        ));
        return errors;
    }

    if !zonal_capable {
        errors.push(FieldError::forbidden(
            path,
            "NAT gateway is only supported for zoned clusters and clusters on availability sets (VMO)",
        ));
    }
    errors.append(validate_idle_timeout(
        nat.idle_connection_timeout_minutes,
        &path.child("idleConnectionTimeoutMinutes"),
    ));

    let ips_path = path.child("ipAddresses");
    match nat.zone {
        None if !nat.ip_addresses.is_empty() => errors.push(FieldError::forbidden(
            &ips_path,
            "public IPs can only be selected for a NAT gateway with a zone",
        )),
        None => {}
        Some(zone) => {
            for (i, ip) in nat.ip_addresses.iter().enumerate() {
                errors.append(validate_public_ip(ip, zone, &ips_path.index(i)));
            }
        }
    }
    errors
}

/// Validate `networks.zones[i].natGateway`; the zone is implied
pub(super) fn validate_zoned_nat_gateway(nat: &ZonedNatGatewayConfig, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();

    if !nat.enabled {
        errors.append(forbid_when_disabled(
            nat.idle_connection_timeout_minutes.is_some(),
            false,
            !nat.ip_addresses.is_empty(),
            path,
        ));
        return errors;
    }

    errors.append(validate_idle_timeout(
        nat.idle_connection_timeout_minutes,
        &path.child("idleConnectionTimeoutMinutes"),
    ));
    let ips_path = path.child("ipAddresses");
    for (i, ip) in nat.ip_addresses.iter().enumerate() {
        errors.append(validate_ip_identity(ip, &ips_path.index(i)));
    }
    errors
}

fn forbid_when_disabled(timeout: bool, zone: bool, ips: bool, path: &FieldPath) -> ErrorList {
    [
        (timeout, "idleConnectionTimeoutMinutes"),
        (zone, "zone"),
        (ips, "ipAddresses"),
    ]
    .into_iter()
    .filter(|(set, _)| *set)
    .map(|(_, name)| {
        FieldError::forbidden(
            &path.child(name),
            "cannot be specified when the NAT gateway is disabled",
        )
    })
    .collect()
}

fn validate_idle_timeout(timeout: Option<i32>, path: &FieldPath) -> ErrorList {
    match timeout {
        Some(minutes)
            if !(NAT_GATEWAY_MIN_IDLE_TIMEOUT_MINUTES..=NAT_GATEWAY_MAX_IDLE_TIMEOUT_MINUTES)
                .contains(&minutes) =>
        {
            FieldError::invalid(
                path,
                BadValue::of(&minutes),
                format!(
                    "idle connection timeout must be between {NAT_GATEWAY_MIN_IDLE_TIMEOUT_MINUTES} and {NAT_GATEWAY_MAX_IDLE_TIMEOUT_MINUTES} minutes"
                ),
            )
            .into()
        }
        _ => ErrorList::new(),
    }
}

fn validate_public_ip(ip: &PublicIpReference, nat_zone: i32, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();
    if ip.zone != nat_zone {
        errors.push(FieldError::invalid(
            &path.child("zone"),
            BadValue::of(&ip.zone),
            format!("public IP must be in the same zone as the NAT gateway ({nat_zone})"),
        ));
    }
    errors.append(validate_ip_identity(
        &ZonedPublicIpReference {
            name: ip.name.clone(),
            resource_group: ip.resource_group.clone(),
        },
        path,
    ));
    errors
}

fn validate_ip_identity(ip: &ZonedPublicIpReference, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();
    let name_path = path.child("name");
    let group_path = path.child("resourceGroup");

    if ip.name.is_empty() {
        errors.push(FieldError::required(&name_path, "public IP name must not be empty"));
    } else {
        errors.append(validate_resource_name(&ip.name, &name_path));
    }
    if ip.resource_group.is_empty() {
        errors.push(FieldError::required(
            &group_path,
            "public IP resource group must not be empty",
        ));
    } else {
        errors.append(validate_resource_group_name(&ip.resource_group, &group_path));
    }
    errors
}
