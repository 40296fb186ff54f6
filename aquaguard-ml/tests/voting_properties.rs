//! Property tests for forest voting

use aquaguard_ml::{DecisionTree, Node, RandomForest};
use proptest::prelude::*;

const CLASSES: u16 = 4;

// Stump: one split with two leaves, or a bare leaf when `feature` is 3
fn stump() -> impl Strategy<Value = DecisionTree> {
    (0u8..4, -10.0f32..40.0, 0..CLASSES, 0..CLASSES).prop_map(|(feature, threshold, left, right)| {
        if feature == 3 {
            DecisionTree::new(vec![Node::leaf(left)])
        } else {
            DecisionTree::new(vec![
                Node::split(feature, threshold, 1, 2),
                Node::leaf(left),
                Node::leaf(right),
            ])
        }
    })
}

fn forest() -> impl Strategy<Value = RandomForest> {
    prop::collection::vec(stump(), 1..12).prop_map(|trees| {
        let classes = (0..CLASSES).map(|c| format!("class{}", c)).collect();
        RandomForest::new(3, classes, trees).unwrap()
    })
}

proptest! {
    #[test]
    fn every_tree_votes_once(forest in forest(), features in prop::array::uniform3(-20.0f32..50.0)) {
        let votes = forest.votes(&features).unwrap();
        prop_assert_eq!(votes.len(), CLASSES as usize);
        prop_assert_eq!(votes.iter().sum::<u32>() as usize, forest.tree_count());
    }

    #[test]
    fn winner_is_lowest_top_class(forest in forest(), features in prop::array::uniform3(-20.0f32..50.0)) {
        let votes = forest.votes(&features).unwrap();
        let winner = forest.predict_index(&features).unwrap();
        let top = votes.iter().copied().max().unwrap_or(0);

        prop_assert_eq!(votes[winner], top);
        prop_assert!(votes[..winner].iter().all(|&v| v < top), "votes {:?}, winner {}", votes, winner);
        prop_assert_eq!(forest.predict_label(&features).unwrap(), forest.classes()[winner].as_str());
    }

    #[test]
    fn wrong_width_is_rejected(forest in forest(), width in 0usize..8) {
        prop_assume!(width != 3);
        let features = vec![1.0f32; width];
        prop_assert!(forest.votes(&features).is_err());
        prop_assert!(forest.predict_index(&features).is_err());
    }
}
