//! Configuration builder for forest training.

use std::fmt;
use std::str::FromStr;

use crate::dataset::Dataset;
use crate::error::TreeError;
use crate::forest::Forest;
use crate::split::SplitStrategy;

/// How many trees to grow and how their splits are chosen.
///
/// Parsed from the command-line spelling: `optimized`, `randomized`, or a
/// positive integer `N` for a forest of `N` randomized trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingMode {
    /// One tree, exhaustive split search.
    Optimized,
    /// One tree, one random attribute per split.
    Randomized,
    /// `n_trees` randomized trees voting together.
    Forest {
        /// Number of trees in the forest.
        n_trees: usize,
    },
}

impl TrainingMode {
    /// Return the split strategy used by every tree.
    #[must_use]
    pub fn strategy(self) -> SplitStrategy {
        match self {
            TrainingMode::Optimized => SplitStrategy::Optimized,
            TrainingMode::Randomized | TrainingMode::Forest { .. } => SplitStrategy::Randomized,
        }
    }

    /// Return the number of trees grown.
    #[must_use]
    pub fn n_trees(self) -> usize {
        match self {
            TrainingMode::Optimized | TrainingMode::Randomized => 1,
            TrainingMode::Forest { n_trees } => n_trees,
        }
    }

    /// Build a forest config for this mode.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidTreeCount`] for `Forest { n_trees: 0 }`.
    pub fn config(self) -> Result<ForestConfig, TreeError> {
        Ok(ForestConfig::new(self.n_trees())?.with_strategy(self.strategy()))
    }
}

impl FromStr for TrainingMode {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "optimized" => Ok(TrainingMode::Optimized),
            "randomized" => Ok(TrainingMode::Randomized),
            other => match other.parse::<usize>() {
                Ok(0) => Err(TreeError::InvalidTreeCount { n_trees: 0 }),
                Ok(n_trees) => Ok(TrainingMode::Forest { n_trees }),
                Err(_) => Err(TreeError::UnknownTrainingMode {
                    mode: other.to_string(),
                }),
            },
        }
    }
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingMode::Optimized => f.write_str("optimized"),
            TrainingMode::Randomized => f.write_str("randomized"),
            TrainingMode::Forest { n_trees } => write!(f, "{n_trees}"),
        }
    }
}

/// Configuration for forest training.
///
/// Construct via [`ForestConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter           | Default      |
/// |---------------------|--------------|
/// | `strategy`          | `Randomized` |
/// | `pruning_threshold` | 1            |
/// | `seed`              | 42           |
#[derive(Debug, Clone)]
pub struct ForestConfig {
    pub(crate) n_trees: usize,
    pub(crate) strategy: SplitStrategy,
    pub(crate) pruning_threshold: usize,
    pub(crate) seed: u64,
}

impl ForestConfig {
    /// Create a new config with the given number of trees.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidTreeCount`] if `n_trees` is zero.
    pub fn new(n_trees: usize) -> Result<Self, TreeError> {
        if n_trees == 0 {
            return Err(TreeError::InvalidTreeCount { n_trees });
        }
        Ok(Self {
            n_trees,
            strategy: SplitStrategy::Randomized,
            pruning_threshold: 1,
            seed: 42,
        })
    }

    /// Set the split-selection strategy shared by every tree.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SplitStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the minimum number of examples a node needs to keep splitting.
    #[must_use]
    pub fn with_pruning_threshold(mut self, pruning_threshold: usize) -> Self {
        self.pruning_threshold = pruning_threshold;
        self
    }

    /// Set the master random seed; each tree draws its own seed from it.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return the number of trees.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.n_trees
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

    /// Return the master random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Train a forest on `dataset`.
    ///
    /// Builds the class label index from `dataset`, then grows each tree on
    /// the full dataset one after the other.
    #[must_use]
    pub fn fit(&self, dataset: &Dataset) -> Forest {
        crate::forest::train(self, dataset)
    }
}
