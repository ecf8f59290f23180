//! # Shoot
//!
//! Validation of an Azure shoot as a whole: networking, worker pools and
//! their provider config, and the embedded infrastructure and control plane
//! configs decoded from raw JSON.

mod networking;
mod worker_config;
mod workers;

pub use networking::validate_networking;
pub use worker_config::{quantity_is_negative, validate_worker_config};
pub use workers::{validate_workers, validate_workers_update};

use crate::admission::decode_at;
use crate::apis::{ControlPlaneConfig, InfrastructureConfig, Shoot};
use crate::constants::LEGACY_AVAILABILITY_SET_ANNOTATION;
use crate::controlplane::validate_control_plane_config;
use crate::field::{ErrorList, FieldError, FieldPath};
use crate::infrastructure::{
    validate_infrastructure_config, validate_infrastructure_config_update, InfrastructureContext,
};
use tracing::trace;

fn provider_path() -> FieldPath {
    FieldPath::from_names(["spec", "provider"])
}

/// Facts the infrastructure config is checked against, taken from the shoot
#[must_use]
pub fn infrastructure_context(shoot: &Shoot) -> InfrastructureContext {
    let networking = shoot.spec.networking.as_ref();
    InfrastructureContext {
        nodes: networking.and_then(|n| n.nodes.clone()),
        pods: networking.and_then(|n| n.pods.clone()),
        services: networking.and_then(|n| n.services.clone()),
        legacy_availability_set: shoot
            .metadata
            .annotations
            .as_ref()
            .and_then(|annotations| annotations.get(LEGACY_AVAILABILITY_SET_ANNOTATION))
            .is_some_and(|value| value == "true"),
    }
}

/// Decode `spec.provider.infrastructureConfig`
///
/// # Errors
///
/// `Required` when the config is missing, `Invalid` when it does not decode.
pub fn decode_infrastructure_config(shoot: &Shoot) -> Result<InfrastructureConfig, FieldError> {
    let path = provider_path().child("infrastructureConfig");
    match &shoot.spec.provider.infrastructure_config {
        Some(raw) => decode_at(raw, "InfrastructureConfig", &path),
        None => Err(FieldError::required(
            &path,
            "infrastructureConfig must be set for Azure shoots",
        )),
    }
}

/// Validate a shoot on creation
pub fn validate_shoot(shoot: &Shoot) -> ErrorList {
    trace!(version = %shoot.spec.kubernetes.version, "Validating shoot");
    let spec_path = FieldPath::new("spec");
    let provider_path = provider_path();
    let mut errors = ErrorList::new();

    match &shoot.spec.networking {
        Some(networking) => {
            errors.append(validate_networking(networking, &spec_path.child("networking")));
        }
        None => errors.push(FieldError::required(
            &spec_path.child("networking"),
            "networking must be set for Azure shoots",
        )),
    }

    let infra = match decode_infrastructure_config(shoot) {
        Ok(infra) => {
            errors.append(validate_infrastructure_config(
                &infra,
                &infrastructure_context(shoot),
                &provider_path.child("infrastructureConfig"),
            ));
            Some(infra)
        }
        Err(e) => {
            errors.push(e);
            None
        }
    };

    if let Some(raw) = &shoot.spec.provider.control_plane_config {
        let path = provider_path.child("controlPlaneConfig");
        match decode_at::<ControlPlaneConfig>(raw, "ControlPlaneConfig", &path) {
            Ok(config) => errors.append(validate_control_plane_config(
                &config,
                &shoot.spec.kubernetes.version,
                &path,
            )),
            Err(e) => errors.push(e),
        }
    }

    errors.append(validate_workers(
        &shoot.spec.provider.workers,
        infra.as_ref(),
        &provider_path.child("workers"),
    ));
    errors
}

/// Validate a shoot update: the create checks on `new` plus the
/// transition rules against `old`
///
/// Transition rules on the infrastructure config only run when both
/// versions decode.
pub fn validate_shoot_update(old: &Shoot, new: &Shoot) -> ErrorList {
    let provider_path = provider_path();
    let mut errors = validate_shoot(new);

    if let (Ok(old_infra), Ok(new_infra)) = (
        decode_infrastructure_config(old),
        decode_infrastructure_config(new),
    ) {
        errors.append(validate_infrastructure_config_update(
            &old_infra,
            &new_infra,
            &provider_path.child("infrastructureConfig"),
        ));
    }

    errors.append(validate_workers_update(
        &old.spec.provider.workers,
        &new.spec.provider.workers,
        &provider_path.child("workers"),
    ));
    errors
}
