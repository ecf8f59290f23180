//! # Cloud Profile Validation
//!
//! Validates the Azure part of a cloud profile: fault and update domain
//! counts, the machine image catalog and its coverage of the
//! provider-neutral image catalog.

use crate::apis::{CloudProfileConfig, DomainCount, GenericMachineImage, ImageReference, MachineImages};
use crate::constants::{DEFAULT_ARCHITECTURE, SUPPORTED_ARCHITECTURES};
use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

const IMAGE_REFERENCE_REQUIRED: &str =
    "must provide either urn, id, sharedGalleryImageID or communityGalleryImageID";

/// Validate a cloud profile config against the generic machine image catalog
pub fn validate_cloud_profile_config(
    config: &CloudProfileConfig,
    generic_images: &[GenericMachineImage],
    path: &FieldPath,
) -> ErrorList {
    trace!(
        images = config.machine_images.len(),
        "Validating cloud profile config"
    );
    let mut errors = ErrorList::new();

    errors.append(validate_domain_counts(
        &config.count_fault_domains,
        "fault",
        &path.child("countFaultDomains"),
    ));
    errors.append(validate_domain_counts(
        &config.count_update_domains,
        "update",
        &path.child("countUpdateDomains"),
    ));

    let images_path = path.child("machineImages");
    if config.machine_images.is_empty() {
        errors.push(FieldError::required(
            &images_path,
            "must provide at least one machine image",
        ));
    }
    for (i, image) in config.machine_images.iter().enumerate() {
        errors.append(validate_machine_image(image, &images_path.index(i)));
    }

    errors.append(validate_image_coverage(
        &config.machine_images,
        generic_images,
        &images_path,
    ));
    errors
}

fn validate_domain_counts(counts: &[DomainCount], kind: &str, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();
    if counts.is_empty() {
        errors.push(FieldError::required(
            path,
            format!("must provide at least one {kind} domain count"),
        ));
    }
    for (i, count) in counts.iter().enumerate() {
        let count_path = path.index(i);
        if count.region.is_empty() {
            errors.push(FieldError::required(
                &count_path.child("region"),
                "must provide a region",
            ));
        }
        if count.count < 0 {
            errors.push(FieldError::invalid(
                &count_path.child("count"),
                BadValue::of(&count.count),
                "count must not be negative",
            ));
        }
    }
    errors
}

fn validate_machine_image(image: &MachineImages, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();
    if image.name.is_empty() {
        errors.push(FieldError::required(
            &path.child("name"),
            "must provide a name",
        ));
    }

    let versions_path = path.child("versions");
    if image.versions.is_empty() {
        errors.push(FieldError::required(
            &versions_path,
            format!("must provide at least one version for machine image {:?}", image.name),
        ));
    }
    for (j, version) in image.versions.iter().enumerate() {
        let version_path = versions_path.index(j);
        if version.version.is_empty() {
            errors.push(FieldError::required(
                &version_path.child("version"),
                "must provide a version",
            ));
        }
        errors.append(validate_single_image_reference(&version.image, &version_path));

        let architecture = version.architecture.as_deref().unwrap_or(DEFAULT_ARCHITECTURE);
        if !SUPPORTED_ARCHITECTURES.contains(&architecture) {
            errors.push(FieldError::not_supported(
                &version_path.child("architecture"),
                BadValue::of(&architecture),
                SUPPORTED_ARCHITECTURES,
            ));
        }
    }
    errors
}

/// Exactly one image reference, then the shape of that reference
///
/// With zero or several references set, a single `Required` is reported at
/// `path` and the shapes are not checked.
pub fn validate_single_image_reference(image: &ImageReference, path: &FieldPath) -> ErrorList {
    if image.count() != 1 {
        return FieldError::required(path, IMAGE_REFERENCE_REQUIRED).into();
    }
    validate_image_reference(image, path)
}

/// Shape of every image reference that is set
pub fn validate_image_reference(image: &ImageReference, path: &FieldPath) -> ErrorList {
    let mut errors = ErrorList::new();

    if let Some(urn) = &image.urn {
        let urn_path = path.child("urn");
        if urn.is_empty() {
            errors.push(FieldError::required(&urn_path, "urn cannot be empty"));
        } else if !is_urn(urn) {
            errors.push(FieldError::invalid(
                &urn_path,
                BadValue::of(urn),
                "please use the format `Publisher:Offer:Sku:Version` for the urn",
            ));
        }
    }
    if let Some(id) = &image.id {
        if id.is_empty() {
            errors.push(FieldError::required(&path.child("id"), "id cannot be empty"));
        }
    }
    if let Some(id) = &image.community_gallery_image_id {
        errors.append(validate_gallery_image_id(
            id,
            "CommunityGalleries",
            &path.child("communityGalleryImageID"),
        ));
    }
    if let Some(id) = &image.shared_gallery_image_id {
        errors.append(validate_gallery_image_id(
            id,
            "SharedGalleries",
            &path.child("sharedGalleryImageID"),
        ));
    }
    errors
}

fn is_urn(urn: &str) -> bool {
    let parts: Vec<&str> = urn.split(':').collect();
    parts.len() == 4 && parts.iter().all(|p| !p.is_empty())
}

// /<Galleries>/<gallery>/Images/<image>/Versions/<version>
fn is_gallery_image_id(id: &str, galleries: &str) -> bool {
    let parts: Vec<&str> = id.split('/').collect();
    parts.len() == 7
        && parts[0].is_empty()
        && parts[1].eq_ignore_ascii_case(galleries)
        && parts[3] == "Images"
        && parts[5] == "Versions"
        && [parts[2], parts[4], parts[6]].iter().all(|p| !p.is_empty())
}

fn validate_gallery_image_id(id: &str, galleries: &str, path: &FieldPath) -> ErrorList {
    if id.is_empty() {
        return FieldError::required(path, "gallery image id cannot be empty").into();
    }
    if is_gallery_image_id(id, galleries) {
        return ErrorList::new();
    }
    FieldError::invalid(
        path,
        BadValue::of(&id),
        format!("please use the format `/{galleries}/<gallery>/Images/<image>/Versions/<version>`"),
    )
    .into()
}

/// Every (image, version, architecture) of the generic catalog needs a provider entry
fn validate_image_coverage(
    provider_images: &[MachineImages],
    generic_images: &[GenericMachineImage],
    path: &FieldPath,
) -> ErrorList {
    let mut index: BTreeMap<&str, (usize, BTreeSet<String>)> = BTreeMap::new();
    for (i, image) in provider_images.iter().enumerate() {
        let entry = index
            .entry(image.name.as_str())
            .or_insert_with(|| (i, BTreeSet::new()));
        for version in &image.versions {
            let architecture = version.architecture.as_deref().unwrap_or(DEFAULT_ARCHITECTURE);
            entry.1.insert(format!("{}-{architecture}", version.version));
        }
    }

    let mut errors = ErrorList::new();
    for image in generic_images {
        let Some((i, mappings)) = index.get(image.name.as_str()) else {
            errors.push(FieldError::required(
                path,
                format!("must provide an image mapping for image {:?}", image.name),
            ));
            continue;
        };
        for version in &image.versions {
            let architectures: Vec<&str> = if version.architectures.is_empty() {
                vec![DEFAULT_ARCHITECTURE]
            } else {
                version.architectures.iter().map(String::as_str).collect()
            };
            for architecture in architectures {
                if !mappings.contains(&format!("{}-{architecture}", version.version)) {
                    errors.push(FieldError::required(
                        &path.index(*i).child("versions"),
                        format!(
                            "must provide an image mapping for version {:?} and architecture {architecture:?}",
                            version.version
                        ),
                    ));
                }
            }
        }
    }
    errors
}
