//! Species classifier
//!
//! Merges the two independent prediction sources into one list:
//!
//! ```text
//! (temp, do, ph) ──┬─> ModelAdapter ──> 0..1 name ──┐
//!                  │                                ├─> normalize ─> union ─> capitalize ─> sort
//!                  └─> RuleTable ─────> 0..N names ─┘
//! ```
//!
//! Classification is a pure function of the inputs, the rule table and the
//! model; the only side effect is debug logging.

use alloc::boxed::Box;

use crate::model::{ModelAdapter, Prediction, SanityBounds};
use crate::rules::RuleTable;
use crate::species::{normalize, ClassificationResult};
use crate::traits::SpeciesModel;

/// Rule table and model adapter combined
#[derive(Debug, Default)]
pub struct Classifier {
    rules: RuleTable,
    adapter: ModelAdapter,
}

impl Classifier {
    /// Classifier from explicit parts
    pub fn new(rules: RuleTable, adapter: ModelAdapter) -> Self {
        Self { rules, adapter }
    }

    /// Standard rule table, no model
    pub fn rules_only() -> Self {
        Self::new(RuleTable::standard(), ModelAdapter::unloaded())
    }

    /// Standard rule table plus `model` with default sanity bounds
    pub fn with_model(model: Box<dyn SpeciesModel>) -> Self {
        Self::new(RuleTable::standard(), ModelAdapter::new(model))
    }

    /// Replace the model sanity bounds
    pub fn with_bounds(mut self, bounds: SanityBounds) -> Self {
        self.adapter = self.adapter.with_bounds(bounds);
        self
    }

    /// Rule table in use
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Model adapter in use
    pub fn adapter(&self) -> &ModelAdapter {
        &self.adapter
    }

    /// Suitable species for the given water conditions
    pub fn classify(&self, temperature: f32, dissolved_oxygen: f32, ph: f32) -> ClassificationResult {
        let prediction = self.adapter.predict(temperature, dissolved_oxygen, ph);
        let mut candidates = self.rules.matches(temperature, dissolved_oxygen, ph);

        if let Prediction::Species(name) = prediction {
            candidates.insert(normalize(&name));
        }

        ClassificationResult::from_normalized(candidates)
    }
}
