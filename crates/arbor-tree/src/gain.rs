//! Threshold partitioning and entropy-based information gain.

use crate::dataset::Dataset;
use crate::distribution::class_distribution;
use crate::labels::LabelIndex;

/// Split `samples` on `attribute`: values `< threshold` go left, the rest right.
///
/// Both sides preserve the input order.
#[must_use]
pub fn partition(
    dataset: &Dataset,
    samples: &[usize],
    attribute: usize,
    threshold: f64,
) -> (Vec<usize>, Vec<usize>) {
    samples
        .iter()
        .copied()
        .partition(|&si| dataset.value(si, attribute) < threshold)
}

/// Entropy reduction from splitting `samples` on `attribute` at `threshold`.
///
/// `H(S) - |L|/|S|·H(L) - |R|/|S|·H(R)` with base-2 entropies. `samples`
/// must be non-empty; an empty slice yields NaN.
#[must_use]
pub fn information_gain(
    dataset: &Dataset,
    samples: &[usize],
    attribute: usize,
    threshold: f64,
    label_index: &LabelIndex,
) -> f64 {
    let (left, right) = partition(dataset, samples, attribute, threshold);

    let h = class_distribution(dataset, samples, label_index).entropy();
    let h_left = class_distribution(dataset, &left, label_index).entropy();
    let h_right = class_distribution(dataset, &right, label_index).entropy();

    let n = samples.len() as f64;
    h - (left.len() as f64 / n) * h_left - (right.len() as f64 / n) * h_right
}
