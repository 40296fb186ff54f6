//! Threshold-based species rules
//!
//! Each [`SpeciesRule`] holds the closed intervals a species tolerates for
//! temperature, dissolved oxygen and pH. A reading matches a rule when at
//! least `min_matches` of the three checks hold (majority vote by default),
//! so a single drifting probe does not drop a species from the result.
//!
//! ```rust
//! use aquaguard_core::RuleTable;
//!
//! let table = RuleTable::standard();
//! let matched = table.matches(25.0, 4.0, 7.0);
//! assert!(matched.contains("lele"));
//! ```

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::constants::{DEFAULT_MIN_MATCHES, RULE_PARAMETER_COUNT, STANDARD_RULES};
use crate::errors::RuleError;
use crate::species::normalize;

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[f32; 2]", into = "[f32; 2]"))]
pub struct Interval {
    min: f32,
    max: f32,
}

impl Interval {
    /// Build an interval, rejecting `min > max` and non-finite endpoints
    pub fn new(min: f32, max: f32) -> Result<Self, RuleError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(RuleError::InvalidInterval { min, max });
        }
        Ok(Self { min, max })
    }

    /// Build from constant table data known to be ordered
    pub(crate) const fn from_bounds(bounds: [f32; 2]) -> Self {
        Self { min: bounds[0], max: bounds[1] }
    }

    /// Lower endpoint
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper endpoint
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f32) -> bool {
        self.min <= value && value <= self.max
    }
}

impl TryFrom<[f32; 2]> for Interval {
    type Error = RuleError;

    fn try_from(bounds: [f32; 2]) -> Result<Self, Self::Error> {
        Self::new(bounds[0], bounds[1])
    }
}

impl From<Interval> for [f32; 2] {
    fn from(interval: Interval) -> Self {
        [interval.min, interval.max]
    }
}

/// Tolerated ranges for one species
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesRule {
    /// Species name (unique, case-insensitive)
    pub name: String,
    /// Water temperature in °C
    pub temperature: Interval,
    /// Dissolved oxygen in mg/L
    pub dissolved_oxygen: Interval,
    /// pH
    pub ph: Interval,
}

impl SpeciesRule {
    /// Build a rule from its name and intervals
    pub fn new(name: &str, temperature: Interval, dissolved_oxygen: Interval, ph: Interval) -> Self {
        Self { name: name.to_string(), temperature, dissolved_oxygen, ph }
    }

    /// Number of parameters inside their interval (0..=3)
    pub fn score(&self, temperature: f32, dissolved_oxygen: f32, ph: f32) -> u8 {
        u8::from(self.temperature.contains(temperature))
            + u8::from(self.dissolved_oxygen.contains(dissolved_oxygen))
            + u8::from(self.ph.contains(ph))
    }
}

/// Read-only table of species rules plus the match threshold
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<SpeciesRule>,
    min_matches: u8,
}

impl RuleTable {
    /// The national-standard table with majority matching
    pub fn standard() -> Self {
        let rules = STANDARD_RULES
            .iter()
            .map(|&(name, temperature, oxygen, ph)| {
                SpeciesRule::new(
                    name,
                    Interval::from_bounds(temperature),
                    Interval::from_bounds(oxygen),
                    Interval::from_bounds(ph),
                )
            })
            .collect();

        Self { rules, min_matches: DEFAULT_MIN_MATCHES }
    }

    /// Custom table; names must be non-empty and unique ignoring case
    pub fn new(rules: Vec<SpeciesRule>, min_matches: u8) -> Result<Self, RuleError> {
        if min_matches == 0 || min_matches > RULE_PARAMETER_COUNT {
            return Err(RuleError::InvalidThreshold { min_matches });
        }

        let mut seen = BTreeSet::new();
        for rule in &rules {
            let key = normalize(&rule.name);
            if key.is_empty() {
                return Err(RuleError::EmptyName);
            }
            if !seen.insert(key) {
                return Err(RuleError::DuplicateSpecies);
            }
            for interval in [rule.temperature, rule.dissolved_oxygen, rule.ph] {
                Interval::new(interval.min, interval.max)?;
            }
        }

        Ok(Self { rules, min_matches })
    }

    /// Same rules, different threshold
    pub fn with_min_matches(self, min_matches: u8) -> Result<Self, RuleError> {
        Self::new(self.rules, min_matches)
    }

    /// Checks that must hold for a match
    pub fn min_matches(&self) -> u8 {
        self.min_matches
    }

    /// All rules in table order
    pub fn rules(&self) -> &[SpeciesRule] {
        &self.rules
    }

    /// Look up a rule by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&SpeciesRule> {
        let key = normalize(name);
        self.rules.iter().find(|rule| normalize(&rule.name) == key)
    }

    /// Normalized names of every species whose score reaches the threshold
    pub fn matches(&self, temperature: f32, dissolved_oxygen: f32, ph: f32) -> BTreeSet<String> {
        let mut matched = BTreeSet::new();

        for rule in &self.rules {
            let score = rule.score(temperature, dissolved_oxygen, ph);
            if score >= self.min_matches {
                log_debug!("Rule match: {} ({}/{})", rule.name, score, RULE_PARAMETER_COUNT);
                matched.insert(normalize(&rule.name));
            }
        }

        matched
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}
