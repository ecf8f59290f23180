//! Per-zone subnets of the multi-subnet layout.

use super::nat::validate_zoned_nat_gateway;
use super::ClusterCidrs;
use crate::apis::Zone;
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use crate::validation::Cidr;
use std::collections::HashSet;

/// Zone subnets as [`Cidr`]s located at `zones[i].cidr`
pub(super) fn zone_cidrs(zones: &[Zone], path: &FieldPath) -> Vec<Cidr> {
    zones
        .iter()
        .enumerate()
        .map(|(i, zone)| Cidr::new(zone.cidr.as_str(), &path.index(i).child("cidr")))
        .collect()
}

/// Validate `networks.zones`
///
/// `cidrs` must come from [`zone_cidrs`] for the same zones.
pub(super) fn validate_zones(
    zones: &[Zone],
    cidrs: &[Cidr],
    cluster: &ClusterCidrs,
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();
    let mut seen = HashSet::new();
    let pods_and_services = cluster.pods_and_services();

    for (i, (zone, cidr)) in zones.iter().zip(cidrs).enumerate() {
        let zone_path = path.index(i);
        if !seen.insert(zone.name) {
            errors.push(FieldError::duplicate(
                &zone_path.child("name"),
                BadValue::of(&zone.name),
            ));
        }

        errors.append(cidr.validate());
        if let Some(nodes) = &cluster.nodes {
            errors.append(cidr.within(&[nodes]));
        }
        errors.append(cidr.disjoint_from(&pods_and_services));

        let others: Vec<&Cidr> = cidrs
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, other)| other)
            .collect();
        errors.append(cidr.disjoint_from(&others));

        if let Some(nat) = &zone.nat_gateway {
            errors.append(validate_zoned_nat_gateway(nat, &zone_path.child("natGateway")));
        }
    }
    errors
}
