//! Test-set evaluation: per-example outcomes, accuracy, and confusion.

use serde::Serialize;
use tracing::{info, instrument};

use crate::confusion::ConfusionMatrix;
use crate::dataset::Dataset;
use crate::error::TreeError;
use crate::forest::Forest;

/// Result of classifying one test example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    /// 1-based position of the example in the test file.
    pub id: usize,
    /// Predicted class label.
    pub predicted: f64,
    /// True class label.
    pub truth: f64,
    /// Whether `predicted == truth`.
    pub correct: bool,
}

/// Evaluation of a forest on a labelled test set.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    outcomes: Vec<Outcome>,
    accuracy: f64,
    confusion: ConfusionMatrix,
}

impl Evaluation {
    /// Per-example outcomes in test-file order.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Fraction of correctly classified test examples, in `[0, 1]`.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Number of correctly classified test examples.
    #[must_use]
    pub fn n_correct(&self) -> usize {
        self.outcomes.iter().filter(|o| o.correct).count()
    }

    /// Confusion matrix over the forest's class labels.
    ///
    /// Test examples whose label never appeared in training have no class
    /// index and are left out of the matrix, though they still count as
    /// misclassified in [`accuracy`](Self::accuracy).
    #[must_use]
    pub fn confusion(&self) -> &ConfusionMatrix {
        &self.confusion
    }
}

impl Forest {
    /// Classify every example of `test` and score the predictions.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::EmptyDataset`] | `test` has no examples |
    /// | [`TreeError::PredictionFeatureMismatch`] | `test` has a different feature count |
    #[instrument(skip_all, fields(n_examples = test.n_examples(), n_trees = self.n_trees()))]
    pub fn evaluate(&self, test: &Dataset) -> Result<Evaluation, TreeError> {
        if test.n_examples() == 0 {
            return Err(TreeError::EmptyDataset);
        }
        if test.n_features() != self.n_features {
            return Err(TreeError::PredictionFeatureMismatch {
                expected: self.n_features,
                got: test.n_features(),
            });
        }

        let votes = self.vote_batch(test.features())?;

        let outcomes: Vec<Outcome> = votes
            .iter()
            .zip(test.labels())
            .enumerate()
            .map(|(i, (&class, &truth))| {
                let predicted = self.label_index.label_of(class);
                Outcome {
                    id: i + 1,
                    predicted,
                    truth,
                    correct: predicted == truth,
                }
            })
            .collect();

        let n_correct = outcomes.iter().filter(|o| o.correct).count();
        let accuracy = n_correct as f64 / outcomes.len() as f64;

        let confusion = ConfusionMatrix::from_outcomes(&outcomes, &self.label_index);

        info!(
            n_correct,
            n_examples = outcomes.len(),
            accuracy,
            "evaluation complete"
        );

        Ok(Evaluation {
            outcomes,
            accuracy,
            confusion,
        })
    }
}
