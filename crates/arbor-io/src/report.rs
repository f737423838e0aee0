//! JSON evaluation report writer.

use std::fs;
use std::path::{Path, PathBuf};

use arbor_tree::{ClassMetrics, ConfusionMatrix, Evaluation, Forest, Outcome, TrainingMode};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;

/// Size and shape of one trained tree.
#[derive(Debug, Serialize)]
pub struct TreeSummary {
    /// 1-based tree number, matching the diagnostic listing.
    pub tree: usize,
    /// Total node count.
    pub n_nodes: usize,
    /// Leaf count.
    pub n_leaves: usize,
    /// Depth of the deepest leaf.
    pub depth: usize,
}

/// Everything recorded about one train-and-evaluate run.
#[derive(Debug, Serialize)]
pub struct EvaluationReport<'a> {
    /// Training mode as given on the command line.
    pub mode: String,
    /// Minimum node size for further splitting.
    pub pruning_threshold: usize,
    /// Master random seed.
    pub seed: u64,
    /// Number of training examples.
    pub n_train: usize,
    /// Number of feature columns.
    pub n_features: usize,
    /// Training class labels in class-index order.
    pub labels: &'a [f64],
    /// Per-tree statistics.
    pub trees: Vec<TreeSummary>,
    /// Fraction of correctly classified test examples.
    pub accuracy: f64,
    /// Per-example outcomes in test-file order.
    pub outcomes: &'a [Outcome],
    /// Confusion matrix over class labels.
    pub confusion: &'a ConfusionMatrix,
    /// Per-class precision, recall, F1, and support.
    pub class_metrics: Vec<ClassMetrics>,
}

impl<'a> EvaluationReport<'a> {
    /// Assemble a report from a trained forest and its evaluation.
    #[must_use]
    pub fn new(
        mode: TrainingMode,
        seed: u64,
        n_train: usize,
        forest: &'a Forest,
        evaluation: &'a Evaluation,
    ) -> Self {
        let trees = forest
            .trees()
            .iter()
            .enumerate()
            .map(|(i, t)| TreeSummary {
                tree: i + 1,
                n_nodes: t.n_nodes(),
                n_leaves: t.n_leaves(),
                depth: t.depth(),
            })
            .collect();

        Self {
            mode: mode.to_string(),
            pruning_threshold: forest.pruning_threshold(),
            seed,
            n_train,
            n_features: forest.n_features(),
            labels: forest.label_index().labels(),
            trees,
            accuracy: evaluation.accuracy(),
            outcomes: evaluation.outcomes(),
            confusion: evaluation.confusion(),
            class_metrics: evaluation.confusion().class_metrics(),
        }
    }
}

/// Writes [`EvaluationReport`]s to a JSON file.
///
/// Creates the parent directory on construction if it does not exist.
#[derive(Debug)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    /// Create a new writer targeting `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the parent directory cannot be created.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn new(path: &Path) -> Result<Self, IoError> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| IoError::OutputDirCreate {
                path: dir.to_path_buf(),
                source: e,
            })?;
            debug!("output directory ready");
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Serialize `report` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Serialize`] | The report cannot be serialized |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all)]
    pub fn write(&self, report: &EvaluationReport<'_>) -> Result<(), IoError> {
        let json =
            serde_json::to_string_pretty(report).map_err(|e| IoError::Serialize { source: e })?;
        fs::write(&self.path, json).map_err(|e| IoError::WriteFile {
            path: self.path.clone(),
            source: e,
        })?;

        info!(path = %self.path.display(), "evaluation report written");
        Ok(())
    }

    /// Return the target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
