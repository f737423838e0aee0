//! Confusion counts and per-class scores keyed by label value.

use serde::Serialize;

use crate::eval::Outcome;
use crate::labels::LabelIndex;

/// Confusion counts over the classes of a [`LabelIndex`].
///
/// `matrix[t][p]` counts test examples whose true label is `labels[t]` and
/// whose predicted label is `labels[p]`. Outcomes with a true label missing
/// from the index are not counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionMatrix {
    labels: Vec<f64>,
    matrix: Vec<Vec<usize>>,
}

/// Precision, recall, and F1 for one class label.
#[derive(Debug, Clone, Serialize)]
pub struct ClassMetrics {
    /// The class label value.
    pub label: f64,
    /// Share of examples predicted as `label` that truly are `label`.
    pub precision: f64,
    /// Share of examples truly labelled `label` that were predicted as such.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Counted examples whose true label is `label`.
    pub support: usize,
}

/// `num / den`, or 0.0 when nothing was counted.
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl ConfusionMatrix {
    /// Tally `outcomes` against the classes of `label_index`.
    #[must_use]
    pub fn from_outcomes(outcomes: &[Outcome], label_index: &LabelIndex) -> Self {
        let n = label_index.n_classes();
        let mut matrix = vec![vec![0usize; n]; n];
        for o in outcomes {
            if let (Some(t), Some(p)) = (
                label_index.index_of(o.truth),
                label_index.index_of(o.predicted),
            ) {
                matrix[t][p] += 1;
            }
        }
        Self {
            labels: label_index.labels().to_vec(),
            matrix,
        }
    }

    /// Number of outcomes counted in the matrix.
    #[must_use]
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Count of examples with true label `truth` predicted as `predicted`.
    ///
    /// Returns 0 for labels outside the index.
    #[must_use]
    pub fn count(&self, truth: f64, predicted: f64) -> usize {
        match (self.position(truth), self.position(predicted)) {
            (Some(t), Some(p)) => self.matrix[t][p],
            _ => 0,
        }
    }

    /// Scores for every class, in ascending label order.
    #[must_use]
    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        let n = self.labels.len();
        let predicted_totals: Vec<usize> =
            (0..n).map(|p| self.matrix.iter().map(|row| row[p]).sum()).collect();

        self.labels
            .iter()
            .zip(&self.matrix)
            .zip(predicted_totals)
            .enumerate()
            .map(|(c, ((&label, row), predicted_total))| {
                let hits = row[c];
                let support: usize = row.iter().sum();
                let precision = ratio(hits, predicted_total);
                let recall = ratio(hits, support);
                let f1 = if hits == 0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect()
    }

    /// Class labels in row and column order.
    #[must_use]
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Return the underlying matrix rows.
    #[must_use]
    pub fn as_rows(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    fn position(&self, label: f64) -> Option<usize> {
        self.labels.iter().position(|l| l.total_cmp(&label).is_eq())
    }
}
