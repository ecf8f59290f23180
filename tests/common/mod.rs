//! Common test utilities
//!
//! Provides shared initialization code for integration tests, including
//! tracing subscriber setup and YAML fixture decoding.

#![allow(dead_code, reason = "not every test target uses every helper")]

use azure_provider_validation::field::{ErrorKind, ErrorList};
use serde::de::DeserializeOwned;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize a tracing subscriber for tests
///
/// Honours `RUST_LOG` (e.g. `RUST_LOG=azure_provider_validation=trace`).
/// Uses a `Once` to ensure it's only installed once across all tests.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Decode a YAML fixture into a typed value
pub fn from_yaml<T: DeserializeOwned>(yaml: &str) -> T {
    serde_yaml::from_str(yaml).expect("fixture should decode")
}

/// Decode a YAML fixture into raw JSON, as embedded provider config
pub fn raw_yaml(yaml: &str) -> serde_json::Value {
    serde_yaml::from_str(yaml).expect("fixture should decode")
}

/// Sorted (kind, path) pairs for comparison
pub fn signature(errors: &ErrorList) -> Vec<(ErrorKind, String)> {
    errors.signature()
}

/// Shorthand for building expected signatures
pub fn sig(entries: &[(ErrorKind, &str)]) -> Vec<(ErrorKind, String)> {
    let mut entries: Vec<_> = entries
        .iter()
        .map(|(kind, path)| (*kind, (*path).to_string()))
        .collect();
    entries.sort();
    entries
}
