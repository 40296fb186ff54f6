//! Random forest classifier
//!
//! Combines decision trees by majority vote and plugs into the monitor as a
//! [`SpeciesModel`].

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use aquaguard_core::{ModelError, ModelResult, SpeciesModel, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

use crate::{DecisionTree, MLError, MLResult, MAX_CLASSES};

/// Export layout as found on disk, before validation
#[derive(Deserialize)]
struct ForestExport {
    n_features: usize,
    classes: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl TryFrom<ForestExport> for RandomForest {
    type Error = MLError;

    fn try_from(export: ForestExport) -> MLResult<Self> {
        Self::new(export.n_features, export.classes, export.trees)
    }
}

/// Forest of decision trees voting on a species label
///
/// Deserializing goes through the same checks as [`RandomForest::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ForestExport")]
pub struct RandomForest {
    /// Width of the feature vector
    n_features: usize,
    /// Species labels, indexed by leaf class
    classes: Vec<String>,
    /// Voting trees
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Build and validate a forest
    pub fn new(n_features: usize, classes: Vec<String>, trees: Vec<DecisionTree>) -> MLResult<Self> {
        let forest = Self { n_features, classes, trees };
        forest.validate()?;
        Ok(forest)
    }

    /// Parse and validate a JSON export
    pub fn from_json_str(json: &str) -> MLResult<Self> {
        let export: ForestExport =
            serde_json::from_str(json).map_err(|e| MLError::Parse(e.to_string()))?;
        Self::try_from(export)
    }

    /// Parse and validate a JSON export from a reader
    #[cfg(feature = "std")]
    pub fn from_reader(reader: impl std::io::Read) -> MLResult<Self> {
        let export: ForestExport = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                MLError::Io(e.to_string())
            } else {
                MLError::Parse(e.to_string())
            }
        })?;
        Self::try_from(export)
    }

    /// Load a JSON export from disk
    #[cfg(feature = "std")]
    pub fn load(path: impl AsRef<std::path::Path>) -> MLResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| MLError::Io(e.to_string()))?;
        let forest = Self::from_reader(std::io::BufReader::new(file))?;

        log_info!(
            "Loaded species forest from {}: {} trees, {} classes",
            path.display(),
            forest.trees.len(),
            forest.classes.len()
        );

        Ok(forest)
    }

    fn validate(&self) -> MLResult<()> {
        if self.trees.is_empty() {
            return Err(MLError::EmptyForest);
        }
        if self.classes.is_empty() {
            return Err(MLError::NoClasses);
        }
        if self.classes.len() > MAX_CLASSES {
            return Err(MLError::TooManyClasses { count: self.classes.len(), max: MAX_CLASSES });
        }
        if self.n_features != FEATURE_COUNT {
            return Err(MLError::FeatureCount { expected: FEATURE_COUNT, actual: self.n_features });
        }

        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.n_features, self.classes.len())?;
        }

        Ok(())
    }

    /// Species labels in class-index order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of voting trees
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Feature vector width
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Votes per class for one sample
    pub fn votes(&self, features: &[f32]) -> MLResult<heapless::Vec<u32, MAX_CLASSES>> {
        if features.len() != self.n_features {
            return Err(MLError::FeatureCount { expected: self.n_features, actual: features.len() });
        }

        let mut tally = heapless::Vec::new();
        tally
            .resize(self.classes.len(), 0u32)
            .map_err(|_| MLError::TooManyClasses { count: self.classes.len(), max: MAX_CLASSES })?;

        for (index, tree) in self.trees.iter().enumerate() {
            let class = tree.predict(features).map_err(|e| match e {
                MLError::MalformedTree { reason, .. } => MLError::MalformedTree { tree: index, reason },
                other => other,
            })?;
            let slot = tally.get_mut(class as usize).ok_or(MLError::MalformedTree {
                tree: index,
                reason: "leaf class out of range",
            })?;
            *slot += 1;
        }

        Ok(tally)
    }

    /// Winning class index, ties to the lowest index
    pub fn predict_index(&self, features: &[f32]) -> MLResult<usize> {
        let tally = self.votes(features)?;

        let mut best = 0;
        for (class, &count) in tally.iter().enumerate() {
            if count > tally[best] {
                best = class;
            }
        }

        Ok(best)
    }

    /// Winning species label
    pub fn predict_label(&self, features: &[f32]) -> MLResult<&str> {
        let index = self.predict_index(features)?;
        self.classes.get(index).map(String::as_str).ok_or(MLError::NoClasses)
    }
}

impl SpeciesModel for RandomForest {
    fn predict(&self, features: &[f32; FEATURE_COUNT]) -> ModelResult<String> {
        self.predict_label(features)
            .map(String::from)
            .map_err(|e| ModelError::Failed { reason: e.reason() })
    }

    fn name(&self) -> &str {
        "random-forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    // Classes: 0 Lele, 1 Nila, 2 Patin. Features: [DO, temperature, pH]
    const FOREST: &str = r#"{
        "n_features": 3,
        "classes": ["Lele", "Nila", "Patin"],
        "trees": [
            { "nodes": [
                { "split": { "feature": 1, "threshold": 26.0, "left": 1, "right": 2 } },
                { "leaf": { "class": 1 } },
                { "split": { "feature": 0, "threshold": 4.0, "left": 3, "right": 4 } },
                { "leaf": { "class": 0 } },
                { "leaf": { "class": 2 } }
            ] },
            { "nodes": [
                { "split": { "feature": 2, "threshold": 7.5, "left": 1, "right": 2 } },
                { "leaf": { "class": 1 } },
                { "leaf": { "class": 0 } }
            ] },
            { "nodes": [ { "leaf": { "class": 1 } } ] }
        ]
    }"#;

    fn forest() -> RandomForest {
        RandomForest::from_json_str(FOREST).unwrap()
    }

    fn single_leaf_forest(classes: usize) -> String {
        let names: Vec<String> = (0..classes).map(|i| alloc::format!("\"s{}\"", i)).collect();
        alloc::format!(
            r#"{{ "n_features": 3, "classes": [{}], "trees": [ {{ "nodes": [ {{ "leaf": {{ "class": 0 }} }} ] }} ] }}"#,
            names.join(",")
        )
    }

    #[test]
    fn test_forest_loads() {
        let forest = forest();
        assert_eq!(forest.tree_count(), 3);
        assert_eq!(forest.classes(), ["Lele", "Nila", "Patin"]);
        assert_eq!(forest.n_features(), 3);
    }

    #[test]
    fn test_unanimous_vote() {
        let forest = forest();
        let votes = forest.votes(&[5.0, 25.0, 7.0]).unwrap();
        assert_eq!(votes.as_slice(), &[0, 3, 0]);
        assert_eq!(forest.predict_label(&[5.0, 25.0, 7.0]).unwrap(), "Nila");
    }

    #[test]
    fn test_majority_vote() {
        // Trees vote Lele, Lele, Nila
        let forest = forest();
        assert_eq!(forest.votes(&[3.0, 30.0, 8.0]).unwrap().as_slice(), &[2, 1, 0]);
        assert_eq!(forest.predict_index(&[3.0, 30.0, 8.0]).unwrap(), 0);
    }

    #[test]
    fn test_tie_goes_to_lowest_class() {
        let forest = RandomForest::new(
            3,
            vec!["Lele".into(), "Nila".into(), "Patin".into()],
            vec![
                DecisionTree::new(vec![crate::Node::leaf(2)]),
                DecisionTree::new(vec![crate::Node::leaf(0)]),
            ],
        )
        .unwrap();

        assert_eq!(forest.predict_label(&[0.0, 0.0, 0.0]).unwrap(), "Lele");
    }

    #[test]
    fn test_wrong_feature_length() {
        assert_eq!(
            forest().predict_index(&[5.0, 25.0]),
            Err(MLError::FeatureCount { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_rejects_bad_exports() {
        assert!(matches!(RandomForest::from_json_str("not json"), Err(MLError::Parse(_))));
        assert_eq!(
            RandomForest::from_json_str(r#"{ "n_features": 3, "classes": ["a"], "trees": [] }"#),
            Err(MLError::EmptyForest)
        );
        assert_eq!(
            RandomForest::from_json_str(
                r#"{ "n_features": 3, "classes": [], "trees": [ { "nodes": [ { "leaf": { "class": 0 } } ] } ] }"#
            ),
            Err(MLError::NoClasses)
        );
        assert_eq!(
            RandomForest::from_json_str(
                r#"{ "n_features": 4, "classes": ["a"], "trees": [ { "nodes": [ { "leaf": { "class": 0 } } ] } ] }"#
            ),
            Err(MLError::FeatureCount { expected: 3, actual: 4 })
        );
        assert!(RandomForest::from_json_str(&single_leaf_forest(MAX_CLASSES)).is_ok());
        assert_eq!(
            RandomForest::from_json_str(&single_leaf_forest(MAX_CLASSES + 1)),
            Err(MLError::TooManyClasses { count: 33, max: 32 })
        );
    }

    #[test]
    fn test_serde_path_is_validated() {
        let empty = r#"{ "n_features": 3, "classes": [], "trees": [ { "nodes": [ { "leaf": { "class": 0 } } ] } ] }"#;
        assert!(serde_json::from_str::<RandomForest>(empty).is_err());

        let round_trip: RandomForest =
            serde_json::from_str(&serde_json::to_string(&forest()).unwrap()).unwrap();
        assert_eq!(round_trip, forest());
    }

    #[test]
    fn test_malformed_tree_is_located() {
        let json = r#"{
            "n_features": 3,
            "classes": ["a", "b"],
            "trees": [
                { "nodes": [ { "leaf": { "class": 0 } } ] },
                { "nodes": [ { "leaf": { "class": 5 } } ] }
            ]
        }"#;
        assert_eq!(
            RandomForest::from_json_str(json),
            Err(MLError::MalformedTree { tree: 1, reason: "leaf class out of range" })
        );
    }

    #[test]
    fn test_species_model_adapter() {
        let forest = forest();
        assert_eq!(SpeciesModel::predict(&forest, &[5.0, 25.0, 7.0]).unwrap(), "Nila");
        assert_eq!(forest.name(), "random-forest");
    }
}
