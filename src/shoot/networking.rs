use crate::apis::Networking;
use crate::constants::{OVERLAY_NETWORKING_TYPE, SUPPORTED_IP_FAMILIES};
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use crate::validation::Cidr;
use tracing::trace;

/// Validate shoot networking
///
/// The nodes range is mandatory on Azure, overlay networking is not
/// available and only IPv4 single-stack is supported.
pub fn validate_networking(networking: &Networking, path: &FieldPath) -> ErrorList {
    trace!(cni = ?networking.type_, "Validating shoot networking");
    let mut errors = ErrorList::new();

    let nodes_path = path.child("nodes");
    match networking.nodes.as_deref() {
        None | Some("") => errors.push(FieldError::required(
            &nodes_path,
            "a nodes CIDR must be provided for Azure shoots",
        )),
        Some(nodes) => errors.append(Cidr::new(nodes, &nodes_path).validate()),
    }

    if networking.type_.as_deref() == Some(OVERLAY_NETWORKING_TYPE) && overlay_enabled(networking) {
        errors.push(FieldError::forbidden(
            &path
                .child("providerConfig")
                .child("overlay")
                .child("enabled"),
            "overlay networking is not supported on Azure",
        ));
    }

    if networking
        .ip_families
        .iter()
        .any(|family| !SUPPORTED_IP_FAMILIES.contains(&family.as_str()))
    {
        errors.push(FieldError::not_supported(
            &path.child("ipFamilies"),
            BadValue::of(&networking.ip_families),
            SUPPORTED_IP_FAMILIES,
        ));
    }
    errors
}

fn overlay_enabled(networking: &Networking) -> bool {
    networking
        .provider_config
        .as_ref()
        .and_then(|config| config.pointer("/overlay/enabled"))
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
}
