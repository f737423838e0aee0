//! Class-probability histograms and entropy.

use crate::dataset::Dataset;
use crate::labels::LabelIndex;

/// Relative class frequencies indexed by a [`LabelIndex`].
///
/// Sums to 1.0 for a non-empty example set. The distribution of an empty
/// set is all zeros and carries no information.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ClassDistribution {
    probs: Vec<f64>,
}

impl ClassDistribution {
    /// Wrap a probability vector.
    pub(crate) fn new(probs: Vec<f64>) -> Self {
        Self { probs }
    }

    /// Return the all-zero distribution over `n_classes`.
    #[must_use]
    pub fn zeros(n_classes: usize) -> Self {
        Self::new(vec![0.0; n_classes])
    }

    /// Return `true` if some class has probability exactly 1.0.
    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.probs.contains(&1.0)
    }

    /// Return `true` if every entry is zero (the distribution of an empty set).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probs.iter().all(|&p| p == 0.0)
    }

    /// Shannon entropy in bits, `-Σ p·log2(p)` over nonzero entries.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        -self
            .probs
            .iter()
            .filter(|&&p| p > 0.0)
            .map(|&p| p * p.log2())
            .sum::<f64>()
    }

    /// Return the class with the highest probability.
    ///
    /// Ties resolve to the lowest class index.
    #[must_use]
    pub fn predicted_class(&self) -> usize {
        let mut best = 0;
        for (idx, &p) in self.probs.iter().enumerate() {
            if p > self.probs[best] {
                best = idx;
            }
        }
        best
    }

    /// Return the probability of one class.
    #[must_use]
    pub fn probability(&self, class: usize) -> f64 {
        self.probs[class]
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.probs.len()
    }

    /// Return the probability vector as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }
}

/// Compute the class distribution of the examples listed in `samples`.
///
/// Labels missing from `label_index` are not counted in any bucket but
/// still count towards the denominator. An empty `samples` slice yields
/// [`ClassDistribution::zeros`].
#[must_use]
pub fn class_distribution(
    dataset: &Dataset,
    samples: &[usize],
    label_index: &LabelIndex,
) -> ClassDistribution {
    let mut counts = vec![0usize; label_index.n_classes()];
    for &si in samples {
        if let Some(class) = label_index.index_of(dataset.label(si)) {
            counts[class] += 1;
        }
    }
    if samples.is_empty() {
        return ClassDistribution::zeros(counts.len());
    }
    let total = samples.len() as f64;
    ClassDistribution::new(counts.iter().map(|&c| c as f64 / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(labels: &[f64]) -> Dataset {
        let features = labels.iter().map(|_| vec![0.0]).collect();
        Dataset::new(features, labels.to_vec()).unwrap()
    }

    #[test]
    fn distribution_sums_to_one() {
        let ds = dataset(&[0.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
        let idx = LabelIndex::build(&ds);
        let dist = class_distribution(&ds, &ds.all_indices(), &idx);
        let sum: f64 = dist.as_slice().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((dist.probability(2) - 0.5).abs() < 1e-12);
        assert!(dist.as_slice().iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn empty_subset_is_zero_vector() {
        let ds = dataset(&[0.0, 1.0]);
        let idx = LabelIndex::build(&ds);
        let dist = class_distribution(&ds, &[], &idx);
        assert_eq!(dist.as_slice(), &[0.0, 0.0]);
        assert!(dist.is_empty());
        assert!(!dist.is_pure());
    }

    #[test]
    fn subset_keeps_global_indexing() {
        // Only label 5.0 in the subset, but it must land at index 1.
        let ds = dataset(&[1.0, 5.0, 9.0]);
        let idx = LabelIndex::build(&ds);
        let dist = class_distribution(&ds, &[1], &idx);
        assert_eq!(dist.as_slice(), &[0.0, 1.0, 0.0]);
        assert!(dist.is_pure());
    }

    #[test]
    fn entropy_pure_is_zero() {
        let dist = ClassDistribution::new(vec![0.0, 1.0, 0.0]);
        assert!(dist.entropy().abs() < f64::EPSILON);
    }

    #[test]
    fn entropy_binary_balanced_is_one_bit() {
        let dist = ClassDistribution::new(vec![0.5, 0.5]);
        assert!((dist.entropy() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn entropy_four_uniform_is_two_bits() {
        let dist = ClassDistribution::new(vec![0.25; 4]);
        assert!((dist.entropy() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn predicted_class_first_maximum() {
        let dist = ClassDistribution::new(vec![0.2, 0.4, 0.4]);
        assert_eq!(dist.predicted_class(), 1);
    }
}
