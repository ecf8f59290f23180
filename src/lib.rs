//! Azure Provider Validation Library
//!
//! Validates the Azure-specific configuration embedded in cluster
//! orchestration resources: infrastructure configs, cloud profiles, backup
//! buckets, credential secrets, control planes, worker pools and workload
//! identities.
//!
//! Every validator is a pure function from a typed input and a
//! [`field::FieldPath`] to an [`field::ErrorList`]; an empty list means
//! valid. Update validators additionally take the previous object.
//!
//! ## Quick Start
//!
//! ```rust
//! use azure_provider_validation::prelude::*;
//!
//! let validator = AdmissionValidator::new(AdmissionConfig::default());
//! # let _ = validator;
//! ```
//!
//! See [`prelude`] for the commonly used types.

pub mod admission;
pub mod apis;
pub mod backupbucket;
pub mod cloudprofile;
pub mod config;
pub mod constants;
pub mod controlplane;
pub mod credentials;
pub mod field;
pub mod infrastructure;
pub mod prelude;
pub mod shoot;
pub mod validation;
pub mod workloadidentity;
