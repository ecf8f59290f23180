use super::worker_config::validate_worker_config;
use crate::admission::decode_at;
use crate::apis::{InfrastructureConfig, NetworkLayout, Volume, Worker, WorkerConfig};
use crate::constants::MAX_DATA_VOLUMES;
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use std::collections::BTreeSet;
use tracing::trace;

/// Validate the worker pools of a shoot
///
/// Zone checks need the decoded infrastructure config and are skipped
/// without it.
pub fn validate_workers(
    workers: &[Worker],
    infra: Option<&InfrastructureConfig>,
    path: &FieldPath,
) -> ErrorList {
    trace!(pools = workers.len(), "Validating worker pools");
    workers
        .iter()
        .enumerate()
        .flat_map(|(i, worker)| validate_worker(worker, infra, &path.index(i)))
        .collect()
}

fn validate_worker(worker: &Worker, infra: Option<&InfrastructureConfig>, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();

    match &worker.volume {
        Some(volume) => errors.append(validate_volume(volume, &path.child("volume"))),
        None => errors.push(FieldError::required(
            &path.child("volume"),
            "must not be empty",
        )),
    }

    let data_volumes_path = path.child("dataVolumes");
    if worker.data_volumes.len() > MAX_DATA_VOLUMES {
        errors.push(FieldError::too_many(
            &data_volumes_path,
            worker.data_volumes.len(),
            MAX_DATA_VOLUMES,
        ));
    }
    for (j, volume) in worker.data_volumes.iter().enumerate() {
        let volume_path = data_volumes_path.index(j);
        if volume.name.as_deref().is_none_or(str::is_empty) {
            errors.push(FieldError::required(
                &volume_path.child("name"),
                "data volume name is required",
            ));
        }
        errors.append(validate_volume(volume, &volume_path));
    }

    let zones_path = path.child("zones");
    let mut seen = BTreeSet::new();
    for (k, zone) in worker.zones.iter().enumerate() {
        if !seen.insert(zone.as_str()) {
            errors.push(FieldError::duplicate(&zones_path.index(k), BadValue::of(zone)));
        }
    }
    if let Some(infra) = infra {
        errors.append(validate_worker_zones(worker, infra, &zones_path));
    }

    if let Some(raw) = &worker.provider_config {
        let config_path = path.child("providerConfig");
        match decode_at::<WorkerConfig>(raw, "WorkerConfig", &config_path) {
            Ok(config) => errors.append(validate_worker_config(&config, worker, &config_path)),
            Err(e) => errors.push(e),
        }
    }
    errors
}

fn validate_volume(volume: &Volume, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();
    if volume.type_.as_deref().is_none_or(str::is_empty) {
        errors.push(FieldError::required(
            &path.child("type"),
            "must not be empty",
        ));
    }
    if volume.volume_size.is_empty() {
        errors.push(FieldError::required(
            &path.child("size"),
            "must not be empty",
        ));
    }
    if let Some(encrypted) = volume.encrypted {
        errors.push(FieldError::not_supported::<&str>(
            &path.child("encrypted"),
            BadValue::of(&encrypted),
            &[],
        ));
    }
    errors
}

fn validate_worker_zones(worker: &Worker, infra: &InfrastructureConfig, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();

    if infra.zoned && worker.zones.is_empty() {
        errors.push(FieldError::required(
            path,
            "at least one zone must be configured for zoned clusters",
        ));
        return errors;
    }
    if !infra.zoned && !worker.zones.is_empty() {
        errors.push(FieldError::forbidden(
            path,
            "zones are not allowed for non-zoned clusters",
        ));
        return errors;
    }

    if infra.networks.layout() == Some(NetworkLayout::MultiSubnet) {
        let configured: BTreeSet<i32> = infra.networks.zones.iter().map(|z| z.name).collect();
        for (k, zone) in worker.zones.iter().enumerate() {
            let zone_path = path.index(k);
            match zone.parse::<i32>() {
                Ok(name) if configured.contains(&name) => {}
                Ok(_) => errors.push(FieldError::invalid(
                    &zone_path,
                    BadValue::of(zone),
                    "zone is not configured in the infrastructure config (networks.zones)",
                )),
                Err(e) => errors.push(FieldError::invalid(
                    &zone_path,
                    BadValue::of(zone),
                    format!("zone must be a number: {e}"),
                )),
            }
        }
    }
    errors
}

/// Validate worker pool updates
///
/// A pool's zones may only grow by appending; new pools are unconstrained.
pub fn validate_workers_update(old: &[Worker], new: &[Worker], path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();
    for (i, worker) in new.iter().enumerate() {
        let Some(previous) = old.iter().find(|w| w.name == worker.name) else {
            continue;
        };
        if zones_changed(&previous.zones, &worker.zones) {
            errors.push(FieldError::immutable(
                &path.index(i).child("zones"),
                BadValue::of(&worker.zones),
            ));
        }
    }
    errors
}

fn zones_changed(old: &[String], new: &[String]) -> bool {
    !old.is_empty() && !new.is_empty() && !new.starts_with(old)
}
