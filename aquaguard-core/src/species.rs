//! Species name normalization and the classification result
//!
//! Rule names and model labels come from different places and disagree on
//! case ("Lele", "lele", " LELE "). Deduplication is therefore an explicit
//! two-step process:
//!
//! 1. [`normalize`] every candidate (trim, Unicode lowercase) and union them
//! 2. [`capitalize`] each survivor for presentation (first character upper,
//!    remainder lower)
//!
//! Casing uses Rust's locale-independent Unicode mappings. Names that only
//! differ under locale-specific rules (Turkish dotted I and similar) are
//! treated as distinct species.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

/// Canonical comparison key for a species name
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Presentation form: first character uppercase, the rest lowercase
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(name.len());
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Sorted, deduplicated list of suitable species
///
/// Names are capitalized and ordered lexicographically so the same inputs
/// always produce the same list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ClassificationResult {
    species: Vec<String>,
}

impl ClassificationResult {
    /// Result with no species
    pub const fn empty() -> Self {
        Self { species: Vec::new() }
    }

    /// Build from normalized (lowercase) names
    pub fn from_normalized(names: BTreeSet<String>) -> Self {
        let mut species: Vec<String> = names.iter().map(|name| capitalize(name)).collect();
        species.sort();
        species.dedup();
        Self { species }
    }

    /// Build from names in any case, normalizing first
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = names
            .into_iter()
            .map(|name| normalize(name.as_ref()))
            .filter(|name| !name.is_empty())
            .collect();
        Self::from_normalized(normalized)
    }

    /// Species names in presentation form
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Case-insensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        let key = normalize(name);
        self.species.iter().any(|s| normalize(s) == key)
    }

    /// Number of species
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// No species matched
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Iterate over species names
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.species.iter().map(String::as_str)
    }

    /// Consume into the underlying list
    pub fn into_vec(self) -> Vec<String> {
        self.species
    }
}
