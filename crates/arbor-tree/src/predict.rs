//! Prediction and voting for the forest.

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::TreeError;
use crate::forest::Forest;

impl Forest {
    /// Vote for a class index across all trees.
    ///
    /// Each tree contributes the distribution of the leaf `sample` reaches.
    /// The winner is the class holding the single highest probability over
    /// all those distributions; ties go to the earlier tree, then the lower
    /// class index.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PredictionFeatureMismatch`] when `sample.len() != n_features`.
    pub fn vote(&self, sample: &[f64]) -> Result<usize, TreeError> {
        if sample.len() != self.n_features {
            return Err(TreeError::PredictionFeatureMismatch {
                expected: self.n_features,
                got: sample.len(),
            });
        }

        let mut best_class = 0usize;
        let mut best_prob = f64::NEG_INFINITY;
        for tree in &self.trees {
            let proba = tree.predict_proba(sample)?;
            for (class, &p) in proba.as_slice().iter().enumerate() {
                if p > best_prob {
                    best_prob = p;
                    best_class = class;
                }
            }
        }
        Ok(best_class)
    }

    /// Predict the class label value for a single sample.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PredictionFeatureMismatch`] when `sample.len() != n_features`.
    pub fn predict(&self, sample: &[f64]) -> Result<f64, TreeError> {
        Ok(self.label_index.label_of(self.vote(sample)?))
    }

    /// Vote for a batch of samples in parallel, preserving input order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PredictionFeatureMismatch`] if any sample has the wrong feature count.
    pub fn vote_batch(&self, features: &[Vec<f64>]) -> Result<Vec<usize>, TreeError> {
        features
            .into_par_iter()
            .map(|sample| self.vote(sample))
            .collect()
    }

    /// Predict label values for a batch of samples in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PredictionFeatureMismatch`] if any sample has the wrong feature count.
    pub fn predict_batch(&self, features: &[Vec<f64>]) -> Result<Vec<f64>, TreeError> {
        features
            .into_par_iter()
            .map(|sample| self.predict(sample))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ForestConfig;
    use crate::dataset::Dataset;
    use crate::distribution::ClassDistribution;
    use crate::forest::Forest;
    use crate::labels::LabelIndex;
    use crate::node::{LeafKind, Node};
    use crate::split::SplitStrategy;
    use crate::tree::DecisionTree;
    use crate::TreeError;

    fn stump(probs: Vec<f64>) -> DecisionTree {
        DecisionTree {
            n_classes: probs.len(),
            nodes: vec![Node::Leaf {
                distribution: ClassDistribution::new(probs),
                kind: LeafKind::Pure,
                n_samples: 1,
            }],
            n_features: 1,
        }
    }

    fn forest_of(trees: Vec<DecisionTree>, labels: &[f64]) -> Forest {
        Forest {
            trees,
            label_index: LabelIndex::from_labels(labels),
            n_features: 1,
            strategy: SplitStrategy::Randomized,
            pruning_threshold: 1,
        }
    }

    #[test]
    fn highest_single_probability_wins() {
        let forest = forest_of(
            vec![
                stump(vec![0.6, 0.4, 0.0]),
                stump(vec![0.0, 0.1, 0.9]),
                stump(vec![0.5, 0.5, 0.0]),
            ],
            &[0.0, 1.0, 2.0],
        );
        assert_eq!(forest.vote(&[0.0]).unwrap(), 2);
    }

    #[test]
    fn ties_resolve_to_first_maximum() {
        let forest = forest_of(
            vec![stump(vec![0.0, 0.5, 0.5]), stump(vec![0.5, 0.5, 0.0])],
            &[0.0, 1.0, 2.0],
        );
        // The first 0.5 seen is tree 0, class 1.
        assert_eq!(forest.vote(&[0.0]).unwrap(), 1);
    }

    #[test]
    fn predict_maps_index_back_to_label() {
        let forest = forest_of(vec![stump(vec![0.2, 0.8])], &[3.0, 7.0]);
        assert!((forest.predict(&[0.0]).unwrap() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wrong_width_rejected() {
        let forest = forest_of(vec![stump(vec![1.0])], &[0.0]);
        let err = forest.vote(&[0.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            TreeError::PredictionFeatureMismatch { expected: 1, got: 2 }
        ));
    }

    #[test]
    fn batch_matches_individual() {
        let ds = Dataset::from_rows(vec![
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.5, 1.0],
            vec![2.0, 0.0, 2.0],
            vec![3.0, 1.5, 0.0],
        ])
        .unwrap();
        let forest = ForestConfig::new(3).unwrap().with_seed(5).fit(&ds);
        let batch = forest.predict_batch(ds.features()).unwrap();
        for (row, &p) in ds.features().iter().zip(&batch) {
            assert!((forest.predict(row).unwrap() - p).abs() < f64::EPSILON);
        }
        let votes = forest.vote_batch(ds.features()).unwrap();
        assert_eq!(votes.len(), ds.n_examples());
    }
}
