//! Forest training.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

use crate::config::ForestConfig;
use crate::dataset::Dataset;
use crate::labels::LabelIndex;
use crate::split::SplitStrategy;
use crate::tree::{DecisionTree, DecisionTreeConfig};

/// A fitted forest of one or more decision trees.
///
/// Every tree shares the same [`LabelIndex`], so all leaf distributions have
/// the same length and class indexing.
#[derive(Debug, Clone)]
pub struct Forest {
    pub(crate) trees: Vec<DecisionTree>,
    pub(crate) label_index: LabelIndex,
    pub(crate) n_features: usize,
    pub(crate) strategy: SplitStrategy,
    pub(crate) pruning_threshold: usize,
}

/// Train the forest sequentially.
#[instrument(skip_all, fields(n_trees = config.n_trees, n_examples = dataset.n_examples()))]
pub(crate) fn train(config: &ForestConfig, dataset: &Dataset) -> Forest {
    let label_index = LabelIndex::build(dataset);

    info!(
        n_trees = config.n_trees,
        n_examples = dataset.n_examples(),
        n_features = dataset.n_features(),
        n_classes = label_index.n_classes(),
        strategy = config.strategy.as_str(),
        pruning_threshold = config.pruning_threshold,
        "training forest"
    );

    // Generate per-tree seeds from master RNG.
    let mut master_rng = ChaCha8Rng::seed_from_u64(config.seed);
    let tree_seeds: Vec<u64> = (0..config.n_trees).map(|_| master_rng.r#gen()).collect();

    let trees: Vec<DecisionTree> = tree_seeds
        .into_iter()
        .enumerate()
        .map(|(tree_id, seed)| {
            let tree = DecisionTreeConfig::new()
                .with_strategy(config.strategy)
                .with_pruning_threshold(config.pruning_threshold)
                .with_seed(seed)
                .fit(dataset, &label_index);
            debug!(tree_id, n_nodes = tree.n_nodes(), depth = tree.depth(), "tree trained");
            tree
        })
        .collect();

    info!(n_trees_trained = trees.len(), "forest training complete");

    Forest {
        trees,
        label_index,
        n_features: dataset.n_features(),
        strategy: config.strategy,
        pruning_threshold: config.pruning_threshold,
    }
}

impl Forest {
    /// Return the trees in training order.
    #[must_use]
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Return the class label index shared by every tree.
    #[must_use]
    pub fn label_index(&self) -> &LabelIndex {
        &self.label_index
    }

    /// Return the number of features this forest was trained on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.label_index.n_classes()
    }

    /// Return the number of trees in the ensemble.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Return the split strategy the trees were grown with.
    #[must_use]
    pub fn strategy(&self) -> SplitStrategy {
        self.strategy
    }

    /// Return the pruning threshold the trees were grown with.
    #[must_use]
    pub fn pruning_threshold(&self) -> usize {
        self.pruning_threshold
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ForestConfig, TrainingMode};
    use crate::dataset::Dataset;
    use crate::node::Node;
    use crate::split::SplitStrategy;

    /// A simple 3-class dataset separable on feature 0.
    fn make_separable_data() -> Dataset {
        let mut rows = Vec::new();
        for class in 0..3 {
            for i in 0..20 {
                rows.push(vec![
                    f64::from(class) * 10.0 + f64::from(i) * 0.15,
                    0.5,
                    f64::from(class),
                ]);
            }
        }
        Dataset::from_rows(rows).unwrap()
    }

    #[test]
    fn forest_has_requested_tree_count() {
        let ds = make_separable_data();
        let forest = ForestConfig::new(3).unwrap().fit(&ds);
        assert_eq!(forest.n_trees(), 3);
        assert_eq!(forest.n_classes(), 3);
        assert_eq!(forest.n_features(), 2);
        assert!(forest.trees().iter().all(|t| t.n_classes() == 3));
    }

    #[test]
    fn deterministic_with_same_seed() {
        let ds = make_separable_data();
        let config = TrainingMode::Forest { n_trees: 3 }
            .config()
            .unwrap()
            .with_seed(99);
        let a = config.fit(&ds);
        let b = config.fit(&ds);
        for (ta, tb) in a.trees().iter().zip(b.trees()) {
            assert_eq!(ta.n_nodes(), tb.n_nodes());
            let fa: Vec<Option<usize>> = ta.breadth_first().map(split_feature).collect();
            let fb: Vec<Option<usize>> = tb.breadth_first().map(split_feature).collect();
            assert_eq!(fa, fb);
        }
    }

    fn split_feature(node: &Node) -> Option<usize> {
        match node {
            Node::Split { feature, .. } => Some(feature.index()),
            Node::Leaf { .. } => None,
        }
    }

    #[test]
    fn optimized_forest_records_strategy() {
        let ds = make_separable_data();
        let forest = ForestConfig::new(1)
            .unwrap()
            .with_strategy(SplitStrategy::Optimized)
            .with_pruning_threshold(2)
            .fit(&ds);
        assert_eq!(forest.strategy(), SplitStrategy::Optimized);
        assert_eq!(forest.pruning_threshold(), 2);
        match forest.trees()[0].root() {
            Node::Split { feature, .. } => assert_eq!(feature.index(), 0),
            Node::Leaf { .. } => panic!("root should split"),
        }
    }
}
