//! Model adapter
//!
//! Wraps an optional, externally supplied [`SpeciesModel`] and turns every way
//! it can fail to answer into an explicit [`Prediction::Skipped`] value. The
//! classifier never sees an error from here: no model, out-of-domain input, a
//! failing model and a panicking model all degrade to rule-only
//! classification.
//!
//! ## Feature order
//!
//! The model is called with `[dissolved_oxygen, temperature, ph]`. That order
//! is the contract the shipped forest was trained against; reusing a trained
//! artifact means keeping it.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::constants::{
    MODEL_DO_MAX_MG_L, MODEL_DO_MIN_MG_L, MODEL_PH_MAX, MODEL_PH_MIN, MODEL_TEMP_MAX_C,
    MODEL_TEMP_MIN_C,
};
use crate::errors::{ModelError, ModelResult};
use crate::rules::Interval;
use crate::species::normalize;
use crate::traits::SpeciesModel;

/// Number of model input features
pub const FEATURE_COUNT: usize = 3;

/// Model input order
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = ["dissolved_oxygen", "temperature", "ph"];

/// Arrange parameters in [`FEATURE_ORDER`]
pub fn features(temperature: f32, dissolved_oxygen: f32, ph: f32) -> [f32; FEATURE_COUNT] {
    [dissolved_oxygen, temperature, ph]
}

/// Input ranges the model is trusted on
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SanityBounds {
    /// Water temperature in °C
    pub temperature: Interval,
    /// Dissolved oxygen in mg/L
    pub dissolved_oxygen: Interval,
    /// pH
    pub ph: Interval,
}

impl Default for SanityBounds {
    fn default() -> Self {
        Self {
            temperature: Interval::from_bounds([MODEL_TEMP_MIN_C, MODEL_TEMP_MAX_C]),
            dissolved_oxygen: Interval::from_bounds([MODEL_DO_MIN_MG_L, MODEL_DO_MAX_MG_L]),
            ph: Interval::from_bounds([MODEL_PH_MIN, MODEL_PH_MAX]),
        }
    }
}

impl SanityBounds {
    /// First parameter outside its bound, if any
    pub fn check(&self, temperature: f32, dissolved_oxygen: f32, ph: f32) -> ModelResult<()> {
        let checks = [
            ("temperature", temperature, self.temperature),
            ("dissolved_oxygen", dissolved_oxygen, self.dissolved_oxygen),
            ("ph", ph, self.ph),
        ];

        for (parameter, value, bound) in checks {
            if !bound.contains(value) {
                return Err(ModelError::OutOfBounds {
                    parameter,
                    value,
                    min: bound.min(),
                    max: bound.max(),
                });
            }
        }

        Ok(())
    }
}

/// Outcome of one adapter call
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Normalized (trimmed, lowercase) species label
    Species(String),
    /// No prediction, and why
    Skipped(ModelError),
}

impl Prediction {
    /// Predicted species, if any
    pub fn species(&self) -> Option<&str> {
        match self {
            Self::Species(name) => Some(name),
            Self::Skipped(_) => None,
        }
    }

    /// Reason the model was skipped, if it was
    pub fn skipped(&self) -> Option<ModelError> {
        match self {
            Self::Species(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

/// Guarded access to an optional species model
pub struct ModelAdapter {
    model: Option<Box<dyn SpeciesModel>>,
    bounds: SanityBounds,
}

impl ModelAdapter {
    /// Adapter around a loaded model
    pub fn new(model: Box<dyn SpeciesModel>) -> Self {
        Self { model: Some(model), bounds: SanityBounds::default() }
    }

    /// Adapter for when the model failed to load
    pub fn unloaded() -> Self {
        Self { model: None, bounds: SanityBounds::default() }
    }

    /// Adapter around `model` if one was loaded
    pub fn from_option(model: Option<Box<dyn SpeciesModel>>) -> Self {
        Self { model, bounds: SanityBounds::default() }
    }

    /// Replace the sanity bounds
    pub fn with_bounds(mut self, bounds: SanityBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Active sanity bounds
    pub fn bounds(&self) -> &SanityBounds {
        &self.bounds
    }

    /// Whether a model is present
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Predict a species, or say why not
    pub fn predict(&self, temperature: f32, dissolved_oxygen: f32, ph: f32) -> Prediction {
        let Some(model) = self.model.as_deref() else {
            return Prediction::Skipped(ModelError::NotLoaded);
        };

        if let Err(reason) = self.bounds.check(temperature, dissolved_oxygen, ph) {
            log_debug!("Model skipped: {}", reason);
            return Prediction::Skipped(reason);
        }

        let features = features(temperature, dissolved_oxygen, ph);
        match invoke(model, &features).map(|label| normalize(&label)) {
            Ok(label) if label.is_empty() => {
                log_warn!("Model {} returned an empty label", model.name());
                Prediction::Skipped(ModelError::EmptyLabel)
            }
            Ok(label) => {
                log_debug!("Model {} predicted {}", model.name(), label);
                Prediction::Species(label)
            }
            Err(reason) => {
                log_warn!("Model {} failed: {}", model.name(), reason);
                Prediction::Skipped(reason)
            }
        }
    }
}

#[cfg(feature = "std")]
fn invoke(model: &dyn SpeciesModel, features: &[f32; FEATURE_COUNT]) -> ModelResult<String> {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    catch_unwind(AssertUnwindSafe(|| model.predict(features)))
        .unwrap_or(Err(ModelError::Panicked))
}

#[cfg(not(feature = "std"))]
fn invoke(model: &dyn SpeciesModel, features: &[f32; FEATURE_COUNT]) -> ModelResult<String> {
    model.predict(features)
}

impl fmt::Debug for ModelAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAdapter")
            .field("model", &self.model.as_ref().map(|m| m.name()))
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl Default for ModelAdapter {
    fn default() -> Self {
        Self::unloaded()
    }
}
