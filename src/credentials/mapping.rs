//! Declarative credential schemas.
//!
//! A [`CredentialMapping`] is a plain table: one [`FieldSpec`] per accepted
//! data key plus the key pairs that must appear together. The engine in
//! `engine.rs` interprets any mapping uniformly.

/// Rules for one data key of a credential secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub required: bool,
    pub is_guid: bool,
    pub immutable: bool,
    /// Accepted values; empty means any value
    pub allowed_values: &'static [&'static str],
}

impl FieldSpec {
    /// Optional key with no further rules
    #[must_use]
    pub const fn optional() -> Self {
        Self {
            required: false,
            is_guid: false,
            immutable: false,
            allowed_values: &[],
        }
    }

    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    #[must_use]
    pub const fn guid(self) -> Self {
        Self {
            is_guid: true,
            ..self
        }
    }

    #[must_use]
    pub const fn immutable(self) -> Self {
        Self {
            immutable: true,
            ..self
        }
    }

    #[must_use]
    pub const fn one_of(self, allowed_values: &'static [&'static str]) -> Self {
        Self {
            allowed_values,
            ..self
        }
    }
}

/// Schema of one credential surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialMapping {
    /// Accepted keys, in reporting order
    pub fields: &'static [(&'static str, FieldSpec)],
    /// Keys that must be present together
    pub pairs: &'static [(&'static str, &'static str)],
}

impl CredentialMapping {
    #[must_use]
    pub fn spec(&self, key: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find_map(|(name, spec)| (*name == key).then_some(spec))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.spec(key).is_some()
    }

    /// Keys in schema order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }
}
