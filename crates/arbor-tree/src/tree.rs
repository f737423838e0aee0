use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

use crate::{
    TreeError,
    dataset::Dataset,
    distribution::{ClassDistribution, class_distribution},
    gain::partition,
    labels::LabelIndex,
    node::{LeafKind, Node, NodeIndex},
    split::{SplitStrategy, choose_attribute},
};

/// Configuration for a single entropy decision tree.
///
/// Construct via [`DecisionTreeConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter           | Default      |
/// |---------------------|--------------|
/// | `strategy`          | `Optimized`  |
/// | `pruning_threshold` | 1            |
/// | `seed`              | 42           |
#[derive(Debug, Clone)]
pub struct DecisionTreeConfig {
    pub(crate) strategy: SplitStrategy,
    pub(crate) pruning_threshold: usize,
    pub(crate) seed: u64,
}

impl DecisionTreeConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategy: SplitStrategy::Optimized,
            pruning_threshold: 1,
            seed: 42,
        }
    }

    /// Set the split-selection strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SplitStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the pruning threshold.
    ///
    /// A node reached by fewer than this many examples becomes a leaf holding
    /// its parent's class distribution.
    #[must_use]
    pub fn with_pruning_threshold(mut self, pruning_threshold: usize) -> Self {
        self.pruning_threshold = pruning_threshold;
        self
    }

    /// Set the random seed used by the randomized strategy.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return the split-selection strategy.
    #[must_use]
    pub fn strategy(&self) -> SplitStrategy {
        self.strategy
    }

    /// Return the pruning threshold.
    #[must_use]
    pub fn pruning_threshold(&self) -> usize {
        self.pruning_threshold
    }

    /// Return the random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Grow a tree over every example of `dataset`.
    ///
    /// `label_index` must come from the full training set so that leaf
    /// distributions share one class indexing across the forest. The root's
    /// fallback distribution is the class distribution of the whole dataset.
    #[instrument(skip_all, fields(n_examples = dataset.n_examples(), strategy = self.strategy.as_str()))]
    pub fn fit(&self, dataset: &Dataset, label_index: &LabelIndex) -> DecisionTree {
        let samples = dataset.all_indices();
        let attributes: Vec<usize> = (0..dataset.n_features()).collect();
        let root_default = class_distribution(dataset, &samples, label_index);

        let mut grower = Grower {
            dataset,
            label_index,
            attributes: &attributes,
            config: self,
            rng: ChaCha8Rng::seed_from_u64(self.seed),
            arena: Vec::new(),
        };
        let root = grower.grow(&samples, &root_default);

        let tree = DecisionTree {
            nodes: grower.arena,
            n_features: dataset.n_features(),
            n_classes: label_index.n_classes(),
        };

        debug!(
            root_index = root.index(),
            n_nodes = tree.n_nodes(),
            n_leaves = tree.n_leaves(),
            depth = tree.depth(),
            "decision tree built"
        );

        tree
    }
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursive tree induction state.
struct Grower<'a> {
    dataset: &'a Dataset,
    label_index: &'a LabelIndex,
    attributes: &'a [usize],
    config: &'a DecisionTreeConfig,
    rng: ChaCha8Rng,
    arena: Vec<Node>,
}

impl Grower<'_> {
    fn push_leaf(&mut self, distribution: ClassDistribution, kind: LeafKind, n_samples: usize) -> NodeIndex {
        let idx = self.arena.len();
        self.arena.push(Node::Leaf {
            distribution,
            kind,
            n_samples,
        });
        NodeIndex::new(idx)
    }

    /// Grow the subtree for `samples` and return the index of its root.
    ///
    /// `default` is the distribution of the parent's examples.
    fn grow(&mut self, samples: &[usize], default: &ClassDistribution) -> NodeIndex {
        let n_samples = samples.len();

        if n_samples < self.config.pruning_threshold {
            return self.push_leaf(default.clone(), LeafKind::Pruned, n_samples);
        }

        let distribution = class_distribution(self.dataset, samples, self.label_index);
        if distribution.is_pure() {
            return self.push_leaf(distribution, LeafKind::Pure, n_samples);
        }

        let Some(split) = choose_attribute(
            self.config.strategy,
            self.attributes,
            self.dataset,
            samples,
            self.label_index,
            &mut self.rng,
        ) else {
            return self.push_leaf(distribution, LeafKind::Unsplittable, n_samples);
        };

        let (left, right) = partition(self.dataset, samples, split.attribute.index(), split.threshold);
        // An empty side would hand the same examples to the child forever.
        if left.is_empty() || right.is_empty() {
            return self.push_leaf(distribution, LeafKind::Unsplittable, n_samples);
        }

        // Arena pattern: reserve index, recurse, then overwrite with the split.
        let node_idx = self.arena.len();
        self.arena.push(Node::Leaf {
            distribution: ClassDistribution::zeros(self.label_index.n_classes()),
            kind: LeafKind::Unsplittable,
            n_samples,
        });

        let left_idx = self.grow(&left, &distribution);
        let right_idx = self.grow(&right, &distribution);

        self.arena[node_idx] = Node::Split {
            feature: split.attribute,
            threshold: split.threshold,
            gain: split.gain,
            left: left_idx,
            right: right_idx,
            n_samples,
        };

        NodeIndex::new(node_idx)
    }
}

/// A fitted entropy decision tree.
///
/// Stored as an arena-based `Vec<Node>` with the root at index 0.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) n_features: usize,
    pub(crate) n_classes: usize,
}

impl DecisionTree {
    /// Return the class distribution of the leaf reached by `sample`.
    ///
    /// At each split, goes left when `sample[feature] < threshold`, right
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PredictionFeatureMismatch`] when `sample.len() != n_features`.
    pub fn predict_proba(&self, sample: &[f64]) -> Result<&ClassDistribution, TreeError> {
        if sample.len() != self.n_features {
            return Err(TreeError::PredictionFeatureMismatch {
                expected: self.n_features,
                got: sample.len(),
            });
        }
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { distribution, .. } => return Ok(distribution),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    idx = if sample[feature.index()] < *threshold {
                        left.index()
                    } else {
                        right.index()
                    };
                }
            }
        }
    }

    /// Return the most probable class index for `sample`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PredictionFeatureMismatch`] when `sample.len() != n_features`.
    pub fn predict(&self, sample: &[f64]) -> Result<usize, TreeError> {
        Ok(self.predict_proba(sample)?.predicted_class())
    }

    /// Return the root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// Return the arena index of the root node.
    #[must_use]
    pub fn root_index(&self) -> NodeIndex {
        NodeIndex::new(0)
    }

    /// Return the node at `index`.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.index()]
    }

    /// Return every node in arena (depth-first, left before right) order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterate the nodes level by level, left to right, starting at the root.
    #[must_use]
    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst {
            tree: self,
            queue: VecDeque::from([self.root_index()]),
        }
    }

    /// Return the total number of nodes in the tree (both splits and leaves).
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of leaf nodes.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Return the number of feature columns the tree was trained on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Return the number of classes in every leaf distribution.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Return the maximum depth of the tree.
    ///
    /// A single-node tree (just a root leaf) has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0usize;
        let mut queue = VecDeque::from([(0usize, 0usize)]);

        while let Some((node_idx, d)) = queue.pop_front() {
            match &self.nodes[node_idx] {
                Node::Leaf { .. } => max_depth = max_depth.max(d),
                Node::Split { left, right, .. } => {
                    queue.push_back((left.index(), d + 1));
                    queue.push_back((right.index(), d + 1));
                }
            }
        }

        max_depth
    }
}

/// Level-order iterator over a [`DecisionTree`], from [`DecisionTree::breadth_first`].
#[derive(Debug)]
pub struct BreadthFirst<'a> {
    tree: &'a DecisionTree,
    queue: VecDeque<NodeIndex>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.queue.pop_front()?;
        let node = self.tree.node(idx);
        if let Node::Split { left, right, .. } = node {
            self.queue.push_back(*left);
            self.queue.push_back(*right);
        }
        Some(node)
    }
}
