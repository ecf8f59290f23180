//! # Control Plane Validation

use crate::apis::ControlPlaneConfig;
use crate::field::{ErrorList, FieldPath};
use crate::validation::validate_feature_gates;
use tracing::trace;

/// Validate a control plane config for a shoot running `kubernetes_version`
///
/// Cloud-controller-manager feature gates must exist in that version.
/// Storage flags carry no constraints.
pub fn validate_control_plane_config(
    config: &ControlPlaneConfig,
    kubernetes_version: &str,
    path: &FieldPath,
) -> ErrorList {
    trace!(version = kubernetes_version, "Validating control plane config");
    let mut errors = ErrorList::new();

    if let Some(ccm) = &config.cloud_controller_manager {
        errors.append(validate_feature_gates(
            &ccm.feature_gates,
            kubernetes_version,
            &path.child("cloudControllerManager").child("featureGates"),
        ));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::{CloudControllerManagerConfig, Storage};
    use crate::field::ErrorKind;

    #[test]
    fn test_feature_gates_are_checked() {
        let config = ControlPlaneConfig {
            cloud_controller_manager: Some(CloudControllerManagerConfig {
                feature_gates: [("Unknown".to_string(), true)].into_iter().collect(),
            }),
            storage: Some(Storage {
                managed_default_storage_class: Some(false),
                managed_default_volume_snapshot_class: None,
            }),
        };
        let errors = validate_control_plane_config(&config, "1.30.0", &FieldPath::root());
        assert_eq!(
            errors.signature(),
            vec![(
                ErrorKind::Invalid,
                "cloudControllerManager.featureGates[Unknown]".to_string()
            )]
        );
    }

    #[test]
    fn test_empty_config() {
        assert!(
            validate_control_plane_config(&ControlPlaneConfig::default(), "1.30", &FieldPath::root())
                .is_empty()
        );
    }
}
