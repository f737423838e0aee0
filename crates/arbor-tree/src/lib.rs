//! Entropy decision trees: induction, information gain, and forest voting.
//!
//! Grows binary decision trees over continuous features, picking each split
//! by base-2 entropy information gain over 50 evenly spaced candidate
//! thresholds per attribute. Trees are grown either with an exhaustive
//! attribute scan ([`SplitStrategy::Optimized`]) or with one randomly drawn
//! attribute per node ([`SplitStrategy::Randomized`]). A [`Forest`] of one
//! or more trees classifies by the single highest leaf probability across
//! all trees.

mod config;
mod confusion;
mod dataset;
mod distribution;
mod error;
mod eval;
mod forest;
mod gain;
mod labels;
mod node;
mod predict;
mod split;
mod tree;

pub use config::{ForestConfig, TrainingMode};
pub use confusion::{ClassMetrics, ConfusionMatrix};
pub use dataset::Dataset;
pub use distribution::{ClassDistribution, class_distribution};
pub use error::TreeError;
pub use eval::{Evaluation, Outcome};
pub use forest::Forest;
pub use gain::{information_gain, partition};
pub use labels::LabelIndex;
pub use node::{FeatureIndex, Gain, LeafKind, Node, NodeIndex};
pub use split::{N_THRESHOLDS, SplitCandidate, SplitStrategy, candidate_thresholds, choose_attribute};
pub use tree::{BreadthFirst, DecisionTree, DecisionTreeConfig};
