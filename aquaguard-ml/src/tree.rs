//! Decision tree evaluation
//!
//! A tree is checked once when the forest is loaded. After that, every child
//! index is in range and strictly greater than its parent's, so a walk from
//! the root always reaches a leaf in at most `nodes.len()` steps.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::{MLError, MLResult, Node};

/// Single decision tree in array representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Tree nodes, root first
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    /// Tree from its nodes, unchecked until [`validate`](Self::validate)
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Check structure against the forest it belongs to
    ///
    /// `index` is the tree's position in the forest and only labels errors.
    pub fn validate(&self, index: usize, n_features: usize, n_classes: usize) -> MLResult<()> {
        let malformed = |reason| MLError::MalformedTree { tree: index, reason };

        if self.nodes.is_empty() {
            return Err(malformed("tree has no nodes"));
        }
        if self.nodes.len() > usize::from(u16::MAX) + 1 {
            return Err(malformed("too many nodes"));
        }

        for (position, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split { feature, threshold, left, right } => {
                    if feature as usize >= n_features {
                        return Err(malformed("split feature out of range"));
                    }
                    if threshold.is_nan() {
                        return Err(malformed("split threshold is NaN"));
                    }
                    for child in [left, right] {
                        let child = child as usize;
                        if child >= self.nodes.len() {
                            return Err(malformed("child index out of range"));
                        }
                        if child <= position {
                            return Err(malformed("child index does not point forward"));
                        }
                    }
                }
                Node::Leaf { class } => {
                    if class as usize >= n_classes {
                        return Err(malformed("leaf class out of range"));
                    }
                }
            }
        }

        Ok(())
    }

    /// Class index of the leaf `features` lands on
    pub fn predict(&self, features: &[f32]) -> MLResult<u16> {
        let mut current = 0usize;

        // Bounded even for a tree that skipped validation
        for _ in 0..self.nodes.len() {
            let node = self.nodes.get(current).ok_or(MLError::MalformedTree {
                tree: 0,
                reason: "child index out of range",
            })?;

            match *node {
                Node::Leaf { class } => return Ok(class),
                Node::Split { .. } => current = node.traverse(features)? as usize,
            }
        }

        Err(MLError::MalformedTree { tree: 0, reason: "walk did not reach a leaf" })
    }

    /// Get the number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Longest root-to-leaf path, in edges
    pub fn depth(&self) -> usize {
        let mut depths: Vec<usize> = alloc::vec![0; self.nodes.len()];
        let mut deepest = 0;

        // Children always follow their parent, so one forward pass suffices
        for (position, node) in self.nodes.iter().enumerate() {
            if let Node::Split { left, right, .. } = *node {
                let parent = depths[position];
                for child in [left as usize, right as usize] {
                    if let Some(slot) = depths.get_mut(child) {
                        *slot = (*slot).max(parent + 1);
                        deepest = deepest.max(*slot);
                    }
                }
            }
        }

        deepest
    }
}
