//! Random forest species model for AquaGuard
//!
//! ## Overview
//!
//! The monitor can be paired with a pre-trained species classifier. This
//! crate evaluates one: a random forest exported to JSON by whatever tool
//! trained it. Training is not done here, only inference.
//!
//! ## Export Format
//!
//! ```json
//! {
//!   "n_features": 3,
//!   "classes": ["lele", "nila", "patin"],
//!   "trees": [
//!     { "nodes": [
//!         { "split": { "feature": 1, "threshold": 26.0, "left": 1, "right": 2 } },
//!         { "leaf": { "class": 1 } },
//!         { "leaf": { "class": 0 } }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Features arrive in [`FEATURE_ORDER`](aquaguard_core::FEATURE_ORDER):
//! dissolved oxygen, temperature, pH. Node 0 is the root of each tree. A split
//! sends a sample left when `x[feature] <= threshold`, right otherwise.
//!
//! ## Voting
//!
//! Every tree votes for the class of the leaf it reaches. The forest answers
//! with the class holding the most votes; ties go to the lowest class index.
//!
//! ## Memory Model
//!
//! ```text
//! Node:   12 bytes (tag + u8 feature + f32 threshold + two u16 children)
//! Tally:  MAX_CLASSES × 4 bytes on the stack per prediction
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use aquaguard_core::{Classifier, MonitorService};
//! use aquaguard_ml::RandomForest;
//!
//! let forest = RandomForest::from_json_str(r#"{
//!     "n_features": 3,
//!     "classes": ["Bawal"],
//!     "trees": [ { "nodes": [ { "leaf": { "class": 0 } } ] } ]
//! }"#)?;
//!
//! let monitor = MonitorService::new(Classifier::with_model(Box::new(forest)));
//! let species = monitor.submit_reading(27.0, 5.0, 7.0).unwrap();
//! assert!(species.contains("bawal"));
//! # Ok::<(), aquaguard_ml::MLError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

use alloc::string::String;

#[cfg(feature = "log")]
#[allow(unused_macros)]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

use thiserror_no_std::Error;

pub mod forest;
pub mod node;
pub mod tree;

pub use forest::RandomForest;
pub use node::Node;
pub use tree::DecisionTree;

/// Largest number of classes a forest may carry
pub const MAX_CLASSES: usize = 32;

/// ML errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MLError {
    /// Model file could not be read
    #[error("Failed to read model: {0}")]
    Io(String),

    /// Model text is not a valid forest export
    #[error("Failed to parse model: {0}")]
    Parse(String),

    /// Forest without trees
    #[error("Forest has no trees")]
    EmptyForest,

    /// Forest without classes
    #[error("Forest has no classes")]
    NoClasses,

    /// More classes than the vote tally holds
    #[error("Too many classes: {count} (max {max})")]
    TooManyClasses {
        /// Classes in the export
        count: usize,
        /// Supported maximum
        max: usize,
    },

    /// Feature vector or export of the wrong width
    #[error("Feature count mismatch: expected {expected}, got {actual}")]
    FeatureCount {
        /// Width the forest was built for
        expected: usize,
        /// Width supplied
        actual: usize,
    },

    /// Tree structure that cannot be evaluated
    #[error("Malformed tree {tree}: {reason}")]
    MalformedTree {
        /// Position of the tree in the forest
        tree: usize,
        /// What is wrong with it
        reason: &'static str,
    },
}

impl MLError {
    /// Static description, used when the error crosses into `ModelError`
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Io(_) => "model file unreadable",
            Self::Parse(_) => "model export unparseable",
            Self::EmptyForest => "forest has no trees",
            Self::NoClasses => "forest has no classes",
            Self::TooManyClasses { .. } => "too many classes",
            Self::FeatureCount { .. } => "feature count mismatch",
            Self::MalformedTree { reason, .. } => *reason,
        }
    }
}

/// Result type for ML operations
pub type MLResult<T> = Result<T, MLError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_carries_tree_detail() {
        let err = MLError::MalformedTree { tree: 2, reason: "child index out of range" };
        assert_eq!(err.reason(), "child index out of range");
        assert_eq!(err.to_string(), "Malformed tree 2: child index out of range");
    }
}
