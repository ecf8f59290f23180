//! # Validation
//!
//! Primitive validators shared by every validator family.
//!
//! - `primitives`: composable string validators and the `all_of` builder
//! - `guid`: GUID matching
//! - `names`: Azure resource naming rules
//! - `cidr`: CIDR parsing, canonical form, containment and overlap
//! - `resource_id`: ARM resource ID parsing
//! - `duration`: Go-style duration parsing and formatting
//! - `featuregates`: Kubernetes feature gate registry

pub mod cidr;
pub mod duration;
pub mod featuregates;
pub mod guid;
pub mod names;
pub mod primitives;
pub mod resource_id;

pub use cidr::{optional_cidr, parse_cidr, Cidr};
pub use duration::{format_go_duration, parse_go_duration};
pub use featuregates::{is_known_feature_gate, parse_kubernetes_version, validate_feature_gates};
pub use guid::{is_guid, validate_guid, GUID_REGEX};
pub use names::{validate_resource_group_name, validate_resource_name, validate_vnet_name};
pub use primitives::{
    all_of, matches, max_length, min_length, not_empty, not_ending_with, one_of, url,
    validate_not_empty, validate_one_of, validate_url, ValidateFn,
};
pub use resource_id::{validate_resource_id, ResourceId, ResourceIdError};
