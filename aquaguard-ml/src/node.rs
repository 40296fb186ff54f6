//! Decision tree node
//!
//! Trees are flat arrays of nodes addressed by `u16` index, root at 0. A
//! split holds the indices of both children; a leaf holds a class index into
//! the forest's class list.

use serde::{Deserialize, Serialize};

use crate::{MLError, MLResult};

/// One node of a decision tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Internal node with split condition
    Split {
        /// Feature index to split on
        feature: u8,
        /// Samples with `x[feature] <= threshold` go left
        threshold: f32,
        /// Left child index
        left: u16,
        /// Right child index
        right: u16,
    },
    /// Terminal node voting for one class
    Leaf {
        /// Index into the forest's class list
        class: u16,
    },
}

impl Node {
    /// Create a split node
    pub const fn split(feature: u8, threshold: f32, left: u16, right: u16) -> Self {
        Self::Split { feature, threshold, left, right }
    }

    /// Create a leaf node
    pub const fn leaf(class: u16) -> Self {
        Self::Leaf { class }
    }

    /// Check if node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Child index to visit next for `features`
    ///
    /// A NaN feature compares false and goes right.
    pub fn traverse(&self, features: &[f32]) -> MLResult<u16> {
        match *self {
            Self::Split { feature, threshold, left, right } => {
                let value = features.get(feature as usize).ok_or(MLError::FeatureCount {
                    expected: feature as usize + 1,
                    actual: features.len(),
                })?;

                if *value <= threshold {
                    Ok(left)
                } else {
                    Ok(right)
                }
            }
            Self::Leaf { .. } => Err(MLError::MalformedTree {
                tree: 0,
                reason: "traversal past a leaf",
            }),
        }
    }
}
