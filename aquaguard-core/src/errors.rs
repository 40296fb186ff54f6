//! Error Types for Reading Intake, Windowing and Model Inference
//!
//! ## Design Philosophy
//!
//! Errors follow the same rules as the rest of the core:
//!
//! 1. **Small Size**: variants carry numbers and `&'static str` only, so every
//!    error is `Copy` and cheap to return from the classification path.
//!
//! 2. **Recoverable by Default**: nothing here is fatal. A rejected reading
//!    never reaches the window, a failed model degrades to rule-only
//!    classification, and an empty window is reported as "no data yet".
//!
//! ## Error Categories
//!
//! ### Intake
//! - `ReadingError::InvalidValue`: a parameter is NaN or infinite
//!
//! ### Windowing
//! - `WindowError::InsufficientData`: rolling average requested with no readings
//!
//! ### Model inference (absorbed by the adapter, never surfaced)
//! - `ModelError::NotLoaded`: no classifier was supplied
//! - `ModelError::OutOfBounds`: input outside the model's sanity bounds
//! - `ModelError::Failed`: the classifier reported an error
//! - `ModelError::Panicked`: the classifier panicked
//! - `ModelError::EmptyLabel`: the classifier answered with a blank name
//!
//! ### Rule tables
//! - `RuleError`: a custom rule table broke one of its invariants
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use aquaguard_core::{WindowError, SensorWindow};
//!
//! let window: SensorWindow = SensorWindow::new();
//! match window.average() {
//!     Ok(avg) => println!("{:.2} °C", avg.temperature),
//!     Err(WindowError::InsufficientData { .. }) => println!("no sensor data yet"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for reading intake
pub type ReadingResult<T> = Result<T, ReadingError>;

/// Result type for window aggregation
pub type WindowResult<T> = Result<T, WindowError>;

/// Result type for model inference
pub type ModelResult<T> = Result<T, ModelError>;

/// Reading rejected before it is recorded anywhere
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ReadingError {
    /// Value makes no physical sense (NaN, infinity)
    #[error("Invalid {field}: not a finite number")]
    InvalidValue {
        /// Parameter that failed ("temperature", "dissolved_oxygen", "ph")
        field: &'static str,
    },
}

/// Rolling-window aggregation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// Not enough readings in the window to aggregate
    #[error("Insufficient data: need {required}, have {available}")]
    InsufficientData {
        /// Minimum number of readings needed
        required: usize,
        /// Readings currently held
        available: usize,
    },
}

/// Why the model produced no prediction
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ModelError {
    /// No classifier was handed to the adapter
    #[error("No species model loaded")]
    NotLoaded,

    /// Input outside the range the model was trained on
    #[error("{parameter} {value} outside model bounds [{min}, {max}]")]
    OutOfBounds {
        /// Offending parameter
        parameter: &'static str,
        /// Submitted value
        value: f32,
        /// Lower sanity bound
        min: f32,
        /// Upper sanity bound
        max: f32,
    },

    /// The classifier reported a failure
    #[error("Model inference failed: {reason}")]
    Failed {
        /// Short description from the classifier
        reason: &'static str,
    },

    /// The classifier panicked during inference
    #[error("Model panicked during inference")]
    Panicked,

    /// The classifier returned a blank species name
    #[error("Model returned an empty species label")]
    EmptyLabel,
}

/// Custom rule table invariant violations
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RuleError {
    /// Interval with min above max, or a non-finite endpoint
    #[error("Invalid interval [{min}, {max}]")]
    InvalidInterval {
        /// Lower endpoint
        min: f32,
        /// Upper endpoint
        max: f32,
    },

    /// Species rule without a name
    #[error("Species rule has an empty name")]
    EmptyName,

    /// Two rules share a name under case-insensitive comparison
    #[error("Duplicate species rule")]
    DuplicateSpecies,

    /// Majority threshold outside 1..=3
    #[error("Match threshold {min_matches} outside 1..=3")]
    InvalidThreshold {
        /// Requested threshold
        min_matches: u8,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for WindowError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InsufficientData { required, available } =>
                defmt::write!(fmt, "Need {} readings, have {}", required, available),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ModelError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NotLoaded => defmt::write!(fmt, "No model"),
            Self::OutOfBounds { parameter, value, min, max } =>
                defmt::write!(fmt, "{} {} outside [{}, {}]", parameter, value, min, max),
            Self::Failed { reason } => defmt::write!(fmt, "Model failed: {}", reason),
            Self::Panicked => defmt::write!(fmt, "Model panicked"),
            Self::EmptyLabel => defmt::write!(fmt, "Empty label"),
        }
    }
}
