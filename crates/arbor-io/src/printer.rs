//! Plain-text diagnostic lines for trained trees and test outcomes.

use std::io::Write;

use arbor_tree::{DecisionTree, Evaluation, Forest, Node, Outcome};

use crate::IoError;

/// Writes the fixed-format diagnostic listing.
///
/// Line formats:
/// - tree node: `tree= 1, node=  1,feature= 0, thr=  0.51, gain=1.000000`
/// - test example: `ID=    1, predicted=  0, true=  0, accuracy=1.00`
/// - summary: `classification accuracy= 1.0000`
///
/// Leaves print `feature=-1, thr= -1.00, gain=0.000000`. Class labels are
/// rendered as integers.
#[derive(Debug)]
pub struct DiagnosticPrinter<W: Write> {
    out: W,
}

impl<W: Write> DiagnosticPrinter<W> {
    /// Create a printer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print every tree of the forest, numbered from 1.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Diagnostics`] if the writer fails.
    pub fn print_forest(&mut self, forest: &Forest) -> Result<(), IoError> {
        for (i, tree) in forest.trees().iter().enumerate() {
            self.print_tree(i + 1, tree)?;
        }
        Ok(())
    }

    /// Print one tree level by level, numbering nodes from 1.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Diagnostics`] if the writer fails.
    pub fn print_tree(&mut self, tree_id: usize, tree: &DecisionTree) -> Result<(), IoError> {
        for (i, node) in tree.breadth_first().enumerate() {
            let (feature, threshold, gain) = match node {
                Node::Split {
                    feature,
                    threshold,
                    gain,
                    ..
                } => (feature.index() as i64, *threshold, gain.value()),
                Node::Leaf { .. } => (-1, -1.0, 0.0),
            };
            writeln!(
                self.out,
                "tree={tree_id:>2}, node={:>3},feature={feature:>2}, thr={threshold:>6.2}, gain={gain:.6}",
                i + 1
            )
            .map_err(|e| IoError::Diagnostics { source: e })?;
        }
        Ok(())
    }

    /// Print one test outcome.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Diagnostics`] if the writer fails.
    pub fn print_outcome(&mut self, outcome: &Outcome) -> Result<(), IoError> {
        let accuracy = if outcome.correct { 1.0 } else { 0.0 };
        writeln!(
            self.out,
            "ID={:>5}, predicted={:>3}, true={:>3}, accuracy={accuracy:>4.2}",
            outcome.id, outcome.predicted as i64, outcome.truth as i64
        )
        .map_err(|e| IoError::Diagnostics { source: e })
    }

    /// Print the overall accuracy line.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Diagnostics`] if the writer fails.
    pub fn print_accuracy(&mut self, accuracy: f64) -> Result<(), IoError> {
        writeln!(self.out, "classification accuracy= {accuracy:>6.4}")
            .map_err(|e| IoError::Diagnostics { source: e })
    }

    /// Print every outcome followed by the overall accuracy.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Diagnostics`] if the writer fails.
    pub fn print_evaluation(&mut self, evaluation: &Evaluation) -> Result<(), IoError> {
        for outcome in evaluation.outcomes() {
            self.print_outcome(outcome)?;
        }
        self.print_accuracy(evaluation.accuracy())?;
        self.out
            .flush()
            .map_err(|e| IoError::Diagnostics { source: e })
    }

    /// Consume the printer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
