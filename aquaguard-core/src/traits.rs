//! Core traits
//!
//! The species model is the one seam where outside code plugs into the
//! classifier. Keep it narrow: a single-sample prediction call.

use alloc::string::String;

use crate::errors::ModelResult;
use crate::model::FEATURE_COUNT;

/// Externally supplied species classifier
///
/// Implementations receive features in [`FEATURE_ORDER`](crate::model::FEATURE_ORDER)
/// (dissolved oxygen, temperature, pH) and return a raw species label. The
/// adapter trims and lowercases the label, so implementations may return it
/// in whatever case the model was trained with.
///
/// Implementations must not block: a call that cannot answer promptly should
/// return `ModelError::Failed` instead of waiting.
pub trait SpeciesModel: Send + Sync {
    /// Predict a species for one sample
    fn predict(&self, features: &[f32; FEATURE_COUNT]) -> ModelResult<String>;

    /// Short identifier used in log lines
    fn name(&self) -> &str {
        "species-model"
    }
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is a usable number (not NaN, infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
