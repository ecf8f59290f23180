//! # CIDR Validation
//!
//! Parsing, canonical-form checks, containment and overlap of CIDR blocks.
//!
//! A [`Cidr`] remembers the field path it was read from so that every
//! comparison can report on the right location. Unparseable blocks are
//! skipped by comparisons; [`Cidr::validate_parse`] reports them once.

use crate::field::{BadValue, ErrorList, FieldError, FieldPath};
use anyhow::{Context, Result};
use ::cidr::{IpCidr, IpInet};
use std::str::FromStr;

/// Parse a CIDR string in prefix notation (`10.0.0.0/16`, `2001:db8::/64`)
///
/// Host bits are accepted here; see [`Cidr::validate_canonical`].
///
/// # Errors
///
/// Returns an error when the prefix is missing or the address cannot be parsed.
pub fn parse_cidr(value: &str) -> Result<IpInet> {
    if !value.contains('/') {
        anyhow::bail!("invalid CIDR address: {value} (missing prefix length)");
    }
    IpInet::from_str(value).with_context(|| format!("invalid CIDR address: {value}"))
}

/// A CIDR block read from a document field
#[derive(Debug, Clone)]
pub struct Cidr {
    raw: String,
    field: FieldPath,
    parsed: Option<IpInet>,
}

impl Cidr {
    pub fn new(raw: impl Into<String>, field: &FieldPath) -> Self {
        let raw = raw.into();
        let parsed = parse_cidr(&raw).ok();
        Self {
            raw,
            field: field.clone(),
            parsed,
        }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.parsed.is_some()
    }

    /// Network block, host bits cleared
    #[must_use]
    pub fn network(&self) -> Option<IpCidr> {
        self.parsed.map(|inet| inet.network())
    }

    /// Report a parse failure at this field
    #[must_use]
    pub fn validate_parse(&self) -> ErrorList {
        match parse_cidr(&self.raw) {
            Ok(_) => ErrorList::new(),
            Err(e) => FieldError::invalid(&self.field, BadValue::of(&self.raw), format!("{e:#}"))
                .into(),
        }
    }

    /// Report host bits set in the address
    #[must_use]
    pub fn validate_canonical(&self) -> ErrorList {
        match self.parsed {
            Some(inet) if inet.address() != inet.network().first_address() => {
                FieldError::invalid(
                    &self.field,
                    BadValue::of(&self.raw),
                    format!(
                        "must be valid canonical CIDR (did you mean {}?)",
                        inet.network()
                    ),
                )
                .into()
            }
            _ => ErrorList::new(),
        }
    }

    /// Parse and canonical checks together
    #[must_use]
    pub fn validate(&self) -> ErrorList {
        let mut errors = self.validate_parse();
        errors.append(self.validate_canonical());
        errors
    }

    /// Whether every address of `self` lies in `other`
    ///
    /// `false` when either side is unparseable or the families differ.
    #[must_use]
    pub fn is_subset_of(&self, other: &Cidr) -> bool {
        match (self.network(), other.network()) {
            (Some(inner), Some(outer)) => {
                inner.family() == outer.family()
                    && outer.network_length() <= inner.network_length()
                    && outer.contains(&inner.first_address())
            }
            _ => false,
        }
    }

    /// Whether `self` and `other` share at least one address
    #[must_use]
    pub fn overlaps(&self, other: &Cidr) -> bool {
        match (self.network(), other.network()) {
            (Some(a), Some(b)) => {
                a.family() == b.family()
                    && (a.contains(&b.first_address()) || b.contains(&a.first_address()))
            }
            _ => false,
        }
    }

    /// Whether `self` overlaps any of `others`
    #[must_use]
    pub fn overlaps_any(&self, others: &[&Cidr]) -> bool {
        others.iter().any(|other| self.overlaps(other))
    }

    /// `self` must be contained in each of `supersets`; errors land on `self`
    #[must_use]
    pub fn within(&self, supersets: &[&Cidr]) -> ErrorList {
        supersets
            .iter()
            .filter(|outer| self.is_parsed() && outer.is_parsed() && !self.is_subset_of(outer))
            .map(|outer| {
                FieldError::invalid(
                    &self.field,
                    BadValue::of(&self.raw),
                    format!("must be a subset of {} ({})", outer.field, outer.raw),
                )
            })
            .collect()
    }

    /// `self` must contain each of `subsets`; errors land on `self`
    #[must_use]
    pub fn covers(&self, subsets: &[&Cidr]) -> ErrorList {
        subsets
            .iter()
            .filter(|inner| self.is_parsed() && inner.is_parsed() && !inner.is_subset_of(self))
            .map(|inner| {
                FieldError::invalid(
                    &self.field,
                    BadValue::of(&self.raw),
                    format!("must contain {} ({})", inner.field, inner.raw),
                )
            })
            .collect()
    }

    /// `self` must not overlap any of `others`; errors land on `self`
    #[must_use]
    pub fn disjoint_from(&self, others: &[&Cidr]) -> ErrorList {
        others
            .iter()
            .filter(|other| self.overlaps(other))
            .map(|other| {
                FieldError::invalid(
                    &self.field,
                    BadValue::of(&self.raw),
                    format!("must not overlap with {} ({})", other.field, other.raw),
                )
            })
            .collect()
    }
}

/// Optional CIDR field as a [`Cidr`]
pub fn optional_cidr(value: Option<&str>, field: &FieldPath) -> Option<Cidr> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| Cidr::new(v, field))
}
