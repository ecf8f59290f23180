//! # Feature Gate Validation
//!
//! Kubernetes feature gates accepted by the cloud-controller-manager, keyed by
//! the Kubernetes minor versions in which each gate exists.

use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use anyhow::{Context, Result};
use semver::Version;
use std::collections::BTreeMap;

/// Lifetime of a feature gate: available from `since`, removed in `until`
struct GateLifetime {
    name: &'static str,
    since: (u64, u64),
    until: Option<(u64, u64)>,
}

const fn gate(name: &'static str, since: (u64, u64), until: Option<(u64, u64)>) -> GateLifetime {
    GateLifetime { name, since, until }
}

static FEATURE_GATES: &[GateLifetime] = &[
    gate("AllAlpha", (1, 0), None),
    gate("AllBeta", (1, 0), None),
    gate("APIListChunking", (1, 8), Some((1, 32))),
    gate("APIPriorityAndFairness", (1, 17), Some((1, 31))),
    gate("APIResponseCompression", (1, 7), None),
    gate("APIServerIdentity", (1, 20), None),
    gate("APIServerTracing", (1, 22), None),
    gate("CloudControllerManagerWebhook", (1, 27), None),
    gate("CloudDualStackNodeIPs", (1, 27), Some((1, 32))),
    gate("ComponentSLIs", (1, 26), Some((1, 32))),
    gate("ContextualLogging", (1, 24), None),
    gate("KMSv2", (1, 25), Some((1, 32))),
    gate("LoadBalancerIPMode", (1, 29), None),
    gate("LoggingAlphaOptions", (1, 24), None),
    gate("LoggingBetaOptions", (1, 24), None),
    gate("OpenAPIEnums", (1, 23), None),
    gate("RemainingItemCount", (1, 15), Some((1, 33))),
    gate("RotateKubeletServerCertificate", (1, 7), None),
    gate("ServerSideApply", (1, 14), Some((1, 32))),
    gate("ServerSideFieldValidation", (1, 23), Some((1, 32))),
    gate("StableLoadBalancerNodeSet", (1, 27), Some((1, 32))),
    gate("StorageVersionAPI", (1, 20), None),
    gate("StorageVersionHash", (1, 14), None),
    gate("TopologyAwareHints", (1, 21), Some((1, 33))),
    gate("WatchList", (1, 27), None),
];

/// Parse a Kubernetes version ("1.30", "v1.30.2") as semver
///
/// # Errors
///
/// Returns an error when the version is not `major.minor[.patch]`.
pub fn parse_kubernetes_version(version: &str) -> Result<Version> {
    let trimmed = version.trim().trim_start_matches('v');
    let normalized = if trimmed.split('.').count() == 2 {
        format!("{trimmed}.0")
    } else {
        trimmed.to_string()
    };
    Version::parse(&normalized).with_context(|| format!("invalid kubernetes version '{version}'"))
}

fn lookup(name: &str) -> Option<&'static GateLifetime> {
    FEATURE_GATES.iter().find(|g| g.name == name)
}

fn is_supported(gate: &GateLifetime, version: &Version) -> bool {
    let minor = (version.major, version.minor);
    gate.since <= minor && gate.until.is_none_or(|until| minor < until)
}

/// Whether `name` is a known feature gate at any version
#[must_use]
pub fn is_known_feature_gate(name: &str) -> bool {
    lookup(name).is_some()
}

/// Validate feature gate names against a Kubernetes version
///
/// Unknown names are `Invalid`, gates absent from `version` are `Forbidden`.
/// An unparseable version yields a single `InternalError`.
pub fn validate_feature_gates(
    gates: &BTreeMap<String, bool>,
    version: &str,
    path: &FieldPath,
) -> ErrorList {
    let mut errors = ErrorList::new();
    if gates.is_empty() {
        return errors;
    }

    let version = match parse_kubernetes_version(version) {
        Ok(v) => v,
        Err(e) => return FieldError::internal(path, format!("{e:#}")).into(),
    };

    for name in gates.keys() {
        let gate_path = path.key(name.as_str());
        match lookup(name) {
            None => errors.push(FieldError::invalid(
                &gate_path,
                BadValue::of(name),
                "unknown feature gate",
            )),
            Some(gate) if !is_supported(gate, &version) => errors.push(FieldError::forbidden(
                &gate_path,
                format!(
                    "not supported in Kubernetes version {}.{}",
                    version.major, version.minor
                ),
            )),
            Some(_) => {}
        }
    }
    errors
}
