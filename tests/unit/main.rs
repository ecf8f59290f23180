//! # Unit Tests
//!
//! Cross-module validator behaviour exercised through the public API with
//! YAML-decoded inputs.

#[path = "../common/mod.rs"]
mod common;

mod apis;
mod credentials;
mod infrastructure;
mod shoot;
