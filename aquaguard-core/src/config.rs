//! Monitor configuration
//!
//! Every tuned number the monitor uses can be overridden here: the rule
//! table, the majority threshold, the model sanity bounds and the oxygen value
//! assumed by two-parameter updates. Missing fields fall back to the defaults
//! in [`constants`](crate::constants).
//!
//! ```json
//! {
//!   "min_matches": 2,
//!   "sanity_bounds": {
//!     "temperature": [0, 40],
//!     "dissolved_oxygen": [0, 20],
//!     "ph": [3, 10]
//!   },
//!   "default_dissolved_oxygen": 5.0,
//!   "rules": [
//!     { "name": "lele", "temperature": [22, 33], "dissolved_oxygen": [2, 6], "ph": [6, 9] }
//!   ]
//! }
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use thiserror_no_std::Error;

use crate::classifier::Classifier;
use crate::constants::{DEFAULT_DISSOLVED_OXYGEN_MG_L, DEFAULT_MIN_MATCHES, RULE_PARAMETER_COUNT};
use crate::errors::RuleError;
use crate::model::{ModelAdapter, SanityBounds};
use crate::rules::{RuleTable, SpeciesRule};
use crate::traits::SpeciesModel;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(String),

    /// Config text is not valid JSON for this schema
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Rule table or threshold rejected
    #[error("Invalid rule table: {0}")]
    Rules(RuleError),

    /// Default dissolved oxygen is not a usable number
    #[error("Invalid default dissolved oxygen: {0}")]
    DefaultOxygen(f32),
}

impl From<RuleError> for ConfigError {
    fn from(err: RuleError) -> Self {
        Self::Rules(err)
    }
}

/// Tunable parameters of the monitor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MonitorConfig {
    /// Species rule table
    pub rules: Vec<SpeciesRule>,
    /// Range checks required for a rule match (1..=3)
    pub min_matches: u8,
    /// Input ranges the model is trusted on
    pub sanity_bounds: SanityBounds,
    /// Dissolved oxygen assumed by two-parameter updates (mg/L)
    pub default_dissolved_oxygen: f32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            rules: RuleTable::standard().rules().to_vec(),
            min_matches: DEFAULT_MIN_MATCHES,
            sanity_bounds: SanityBounds::default(),
            default_dissolved_oxygen: DEFAULT_DISSOLVED_OXYGEN_MG_L,
        }
    }
}

impl MonitorConfig {
    /// Standard table, every range must hold
    pub fn strict() -> Self {
        Self { min_matches: RULE_PARAMETER_COUNT, ..Self::default() }
    }

    /// Check every invariant without building anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rule_table()?;
        if !self.default_dissolved_oxygen.is_finite() {
            return Err(ConfigError::DefaultOxygen(self.default_dissolved_oxygen));
        }
        Ok(())
    }

    /// Validated rule table
    pub fn rule_table(&self) -> Result<RuleTable, ConfigError> {
        Ok(RuleTable::new(self.rules.clone(), self.min_matches)?)
    }

    /// Classifier for this configuration around an optional model
    pub fn classifier(&self, model: Option<Box<dyn SpeciesModel>>) -> Result<Classifier, ConfigError> {
        self.validate()?;
        let adapter = ModelAdapter::from_option(model).with_bounds(self.sanity_bounds);
        Ok(Classifier::new(self.rule_table()?, adapter))
    }

    /// Parse and validate a JSON document
    #[cfg(feature = "std")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    #[cfg(feature = "std")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&text)
    }
}
