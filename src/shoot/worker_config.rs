use crate::apis::{Worker, WorkerConfig};
use crate::cloudprofile::validate_single_image_reference;
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use crate::validation::validate_url;
use anyhow::{bail, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Kubernetes resource quantity: signed decimal with an optional binary
/// suffix, decimal suffix or exponent
static QUANTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?)(\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+|Ki|Mi|Gi|Ti|Pi|Ei|[numkMGTPE])?$")
        .expect("quantity regex is a valid literal")
});

/// Whether a quantity string is negative
///
/// # Errors
///
/// Fails when `value` is not a quantity.
pub fn quantity_is_negative(value: &str) -> Result<bool> {
    let Some(caps) = QUANTITY_REGEX.captures(value.trim()) else {
        bail!("quantity {value:?} must match the regular expression {}", QUANTITY_REGEX.as_str());
    };
    let negative = caps.get(1).is_some_and(|sign| sign.as_str() == "-");
    let non_zero = caps
        .get(2)
        .is_some_and(|number| number.as_str().chars().any(|c| c.is_ascii_digit() && c != '0'));
    Ok(negative && non_zero)
}

/// Validate the decoded provider config of a worker pool
pub fn validate_worker_config(config: &WorkerConfig, worker: &Worker, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();

    if let Some(template) = &config.node_template {
        let capacity_path = path.child("nodeTemplate").child("capacity");
        for (resource, quantity) in &template.capacity {
            let resource_path = capacity_path.key(resource);
            match quantity_is_negative(&quantity.0) {
                Ok(false) => {}
                Ok(true) => errors.push(FieldError::invalid(
                    &resource_path,
                    BadValue::of(&quantity.0),
                    "must be greater than or equal to 0",
                )),
                Err(e) => errors.push(FieldError::invalid(
                    &resource_path,
                    BadValue::of(&quantity.0),
                    format!("{e:#}"),
                )),
            }
        }
    }

    if let Some(uri) = config
        .diagnostics_profile
        .as_ref()
        .and_then(|profile| profile.storage_uri.as_deref())
    {
        errors.append(validate_url(
            uri,
            &path.child("diagnosticsProfile").child("storageURI"),
        ));
    }

    let pool_volumes: BTreeSet<&str> = worker
        .data_volumes
        .iter()
        .filter_map(|volume| volume.name.as_deref())
        .collect();
    let mut seen = BTreeSet::new();
    let volumes_path = path.child("dataVolumes");
    for (i, volume) in config.data_volumes.iter().enumerate() {
        let volume_path = volumes_path.index(i);
        let name_path = volume_path.child("name");
        if !seen.insert(volume.name.as_str()) {
            errors.push(FieldError::duplicate(&name_path, BadValue::of(&volume.name)));
        } else if !pool_volumes.contains(volume.name.as_str()) {
            errors.push(FieldError::invalid(
                &name_path,
                BadValue::of(&volume.name),
                format!("no data volume with name {} exists", volume.name),
            ));
        }
        if let Some(image) = &volume.image_ref {
            errors.append(validate_single_image_reference(
                image,
                &volume_path.child("imageRef"),
            ));
        }
    }
    errors
}
