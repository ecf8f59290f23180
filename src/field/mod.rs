//! # Field
//!
//! Field paths and the field-scoped error model shared by every validator.
//!
//! Validators never stop at the first problem: each returns an [`ErrorList`]
//! and callers concatenate the lists of their sub-validators.

mod error;
mod path;

pub use error::{BadValue, ErrorKind, ErrorList, FieldError, HIDDEN_VALUE};
pub use path::{FieldPath, Segment};
