// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    reason = "property tests assert by panicking"
)]

//! Property-based tests for azure-provider-validation.
//!
//! Uses proptest to generate random provider configs and verify invariants
//! of the validators against independent oracles.

use azure_provider_validation::apis::{
    BackupBucketConfig, ImmutableConfig, InfrastructureConfig, MetaDuration, NatGatewayConfig,
    Zone,
};
use azure_provider_validation::backupbucket::validate_backup_bucket_config_update;
use azure_provider_validation::credentials::validate_cloud_provider_secret;
use azure_provider_validation::field::{ErrorKind, FieldPath, Segment};
use azure_provider_validation::infrastructure::{
    validate_infrastructure_config, validate_infrastructure_config_update, InfrastructureContext,
};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use proptest::prelude::*;
use serde_json::Value;
use std::net::Ipv4Addr;

const NODES: &str = "10.250.0.0/16";
const PODS: &str = "100.96.0.0/11";
const SERVICES: &str = "100.64.0.0/13";

fn ctx() -> InfrastructureContext {
    InfrastructureContext {
        nodes: Some(NODES.to_string()),
        pods: Some(PODS.to_string()),
        services: Some(SERVICES.to_string()),
        legacy_availability_set: false,
    }
}

/// Strategy for CIDRs around the cluster ranges, canonical or not.
fn any_cidr() -> impl Strategy<Value = String> {
    let base = prop_oneof![
        Just([10u8, 250, 0, 0]),
        Just([10, 250, 32, 0]),
        Just([10, 250, 64, 0]),
        Just([10, 251, 0, 0]),
        Just([10, 0, 0, 0]),
        Just([100, 96, 0, 0]),
        Just([10, 250, 0, 7]),
    ];
    (base, 8u8..=24).prop_map(|(octets, prefix)| {
        format!(
            "{}.{}.{}.{}/{prefix}",
            octets[0], octets[1], octets[2], octets[3]
        )
    })
}

fn any_zone() -> impl Strategy<Value = Zone> {
    (1i32..=3, any_cidr()).prop_map(|(name, cidr)| Zone {
        name,
        cidr,
        ..Zone::default()
    })
}

fn any_nat_gateway() -> impl Strategy<Value = Option<NatGatewayConfig>> {
    proptest::option::of((any::<bool>(), proptest::option::of(0i32..=150)).prop_map(
        |(enabled, idle_connection_timeout_minutes)| NatGatewayConfig {
            enabled,
            idle_connection_timeout_minutes,
            ..NatGatewayConfig::default()
        },
    ))
}

/// Strategy for infrastructure configs in either layout (or neither).
fn any_infrastructure() -> impl Strategy<Value = InfrastructureConfig> {
    (
        any::<bool>(),
        proptest::option::of(any_cidr()),
        proptest::collection::vec(any_zone(), 0..=3),
        proptest::option::of(any_cidr()),
        any_nat_gateway(),
    )
        .prop_map(|(zoned, workers, zones, vnet_cidr, nat_gateway)| {
            let mut infra = InfrastructureConfig {
                zoned,
                ..InfrastructureConfig::default()
            };
            infra.networks.workers = workers;
            infra.networks.zones = zones;
            infra.networks.vnet.cidr = vnet_cidr;
            infra.networks.nat_gateway = nat_gateway;
            infra
        })
}

/// Independent IPv4 block arithmetic: (network, mask), host bits cleared.
fn block(cidr: &str) -> (u32, u32) {
    let (addr, prefix) = cidr.split_once('/').unwrap();
    let addr: Ipv4Addr = addr.parse().unwrap();
    let prefix: u32 = prefix.parse().unwrap();
    let mask = if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) };
    (u32::from(addr) & mask, mask)
}

fn contains(outer: &str, inner: &str) -> bool {
    let (outer_net, outer_mask) = block(outer);
    let (inner_net, inner_mask) = block(inner);
    outer_mask <= inner_mask && inner_net & outer_mask == outer_net
}

fn disjoint(a: &str, b: &str) -> bool {
    !contains(a, b) && !contains(b, a)
}

/// Whether `path` names a field under a real location of `doc`
///
/// The parent must exist; the leaf may be absent (missing required field).
fn resolves(doc: &Value, path: &FieldPath) -> bool {
    let segments = path.segments();
    let Some((_, parents)) = segments.split_last() else {
        return true;
    };
    let mut current = doc;
    for segment in parents {
        let next = match segment {
            Segment::Child(name) | Segment::Key(name) => current.get(name.as_str()),
            Segment::Index(i) => current.get(*i),
        };
        match next {
            Some(value) => current = value,
            None => return false,
        }
    }
    true
}

proptest! {
    /// P1/P2: validation is deterministic, including the error multiset.
    #[test]
    fn prop_validation_is_deterministic(infra in any_infrastructure()) {
        let first = validate_infrastructure_config(&infra, &ctx(), &FieldPath::root());
        let second = validate_infrastructure_config(&infra, &ctx(), &FieldPath::root());
        prop_assert_eq!(first.signature(), second.signature());
        prop_assert_eq!(first.to_string(), second.to_string());
    }

    /// P3: a valid config stays valid after a serializer round-trip.
    #[test]
    fn prop_valid_configs_survive_round_trip(infra in any_infrastructure()) {
        if validate_infrastructure_config(&infra, &ctx(), &FieldPath::root()).is_empty() {
            let json = serde_json::to_value(&infra).unwrap();
            let decoded: InfrastructureConfig = serde_json::from_value(json).unwrap();
            prop_assert_eq!(&decoded, &infra);
            prop_assert!(validate_infrastructure_config(&decoded, &ctx(), &FieldPath::root()).is_empty());
        }
    }

    /// P4: every error addresses a sub-field of the input.
    #[test]
    fn prop_errors_are_located_in_the_input(infra in any_infrastructure()) {
        let doc = serde_json::to_value(&infra).unwrap();
        for error in &validate_infrastructure_config(&infra, &ctx(), &FieldPath::root()) {
            prop_assert!(resolves(&doc, error.field()), "dangling path {}", error.field());
        }
    }

    /// P5: credential values are never echoed back.
    #[test]
    fn prop_credential_values_are_hidden(
        entries in proptest::collection::btree_map(
            prop_oneof![
                Just("subscriptionID".to_string()),
                Just("tenantID".to_string()),
                Just("clientID".to_string()),
                Just("clientSecret".to_string()),
            ],
            "[ a-f0-9\\-\n]{0,40}",
            0..=4,
        )
    ) {
        let secret = Secret {
            data: Some(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), ByteString(v.as_bytes().to_vec())))
                    .collect(),
            ),
            ..Secret::default()
        };
        for error in &validate_cloud_provider_secret(&secret, &FieldPath::root()) {
            if matches!(error.kind(), ErrorKind::Invalid | ErrorKind::NotSupported) {
                prop_assert!(error.bad_value().is_hidden(), "{error}");
            }
        }
    }

    /// P6: an accepted single-subnet layout satisfies the containment
    /// invariants by independent arithmetic.
    #[test]
    fn prop_accepted_single_subnet_is_sound(
        workers in any_cidr(),
        vnet in proptest::option::of(any_cidr()),
    ) {
        let mut infra = InfrastructureConfig { zoned: true, ..InfrastructureConfig::default() };
        infra.networks.workers = Some(workers.clone());
        infra.networks.vnet.cidr = vnet.clone();
        if validate_infrastructure_config(&infra, &ctx(), &FieldPath::root()).is_empty() {
            prop_assert!(contains(NODES, &workers));
            prop_assert!(disjoint(&workers, PODS));
            prop_assert!(disjoint(&workers, SERVICES));
            if let Some(vnet) = vnet {
                prop_assert!(contains(&vnet, &workers));
                prop_assert!(contains(&vnet, NODES));
                prop_assert!(disjoint(&vnet, PODS));
            }
        }
    }

    /// P6: accepted zones are pairwise disjoint and inside the nodes range.
    #[test]
    fn prop_accepted_zones_are_sound(zones in proptest::collection::vec(any_zone(), 1..=3)) {
        let mut infra = InfrastructureConfig { zoned: true, ..InfrastructureConfig::default() };
        infra.networks.vnet.cidr = Some(NODES.to_string());
        infra.networks.zones = zones.clone();
        if validate_infrastructure_config(&infra, &ctx(), &FieldPath::root()).is_empty() {
            for (i, zone) in zones.iter().enumerate() {
                prop_assert!(contains(NODES, &zone.cidr));
                for other in &zones[i + 1..] {
                    prop_assert!(disjoint(&zone.cidr, &other.cidr));
                }
            }
        }
    }

    /// P7: a locked policy only ever moves to a locked policy with a
    /// period at least as long.
    #[test]
    fn prop_locked_retention_is_monotonic(
        old_days in 1i64..=30,
        new in proptest::option::of((0i64..=60, any::<bool>())),
    ) {
        let policy = |days: i64, locked: bool| ImmutableConfig {
            retention_type: "bucket".to_string(),
            retention_period: MetaDuration::hours(days * 24),
            locked,
        };
        let old = BackupBucketConfig {
            immutability: Some(policy(old_days, true)),
            ..BackupBucketConfig::default()
        };
        let new_config = BackupBucketConfig {
            immutability: new.map(|(days, locked)| policy(days, locked)),
            ..BackupBucketConfig::default()
        };
        if validate_backup_bucket_config_update(&old, &new_config, &FieldPath::root()).is_empty() {
            let (days, locked) = new.unwrap();
            prop_assert!(locked);
            prop_assert!(days >= old_days);
        }
    }

    /// P8: an accepted move to zones keeps the old workers subnet as a zone.
    #[test]
    fn prop_layout_migration_is_anchored(
        workers in any_cidr(),
        zones in proptest::collection::vec(any_zone(), 1..=3),
    ) {
        let mut old = InfrastructureConfig { zoned: true, ..InfrastructureConfig::default() };
        old.networks.workers = Some(workers.clone());
        let mut new = InfrastructureConfig { zoned: true, ..InfrastructureConfig::default() };
        new.networks.zones = zones.clone();
        if validate_infrastructure_config_update(&old, &new, &FieldPath::root()).is_empty() {
            prop_assert!(zones.iter().any(|zone| zone.cidr == workers));
        }
    }
}
