use std::cmp::Ordering;

use crate::dataset::Dataset;

/// Dense mapping from class label values to indices `0..n_classes`.
///
/// Labels are sorted ascending, so index 0 is the smallest label seen in the
/// training set. Built once from the full training set and shared by every
/// tree of a forest; never rebuilt from a subset.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelIndex {
    labels: Vec<f64>,
}

impl LabelIndex {
    /// Collect the distinct labels of `dataset` and assign ascending indices.
    #[must_use]
    pub fn build(dataset: &Dataset) -> Self {
        Self::from_labels(dataset.labels())
    }

    /// Build an index from raw label values.
    pub(crate) fn from_labels(values: &[f64]) -> Self {
        let mut labels = values.to_vec();
        labels.sort_unstable_by(f64::total_cmp);
        labels.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
        Self { labels }
    }

    /// Return the index of `label`, or `None` if it never occurred in training.
    #[must_use]
    pub fn index_of(&self, label: f64) -> Option<usize> {
        self.labels.binary_search_by(|l| l.total_cmp(&label)).ok()
    }

    /// Return the label value for a class index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_classes()`.
    #[must_use]
    pub fn label_of(&self, index: usize) -> f64 {
        self.labels[index]
    }

    /// Return the number of distinct classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Return the sorted distinct labels.
    #[must_use]
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::LabelIndex;

    #[test]
    fn sorted_ascending_and_deduplicated() {
        let idx = LabelIndex::from_labels(&[7.0, 3.0, 7.0, 1.0, 3.0]);
        assert_eq!(idx.labels(), &[1.0, 3.0, 7.0]);
        assert_eq!(idx.n_classes(), 3);
    }

    #[test]
    fn index_of_known_labels() {
        let idx = LabelIndex::from_labels(&[2.0, 0.0, 5.0]);
        assert_eq!(idx.index_of(0.0), Some(0));
        assert_eq!(idx.index_of(2.0), Some(1));
        assert_eq!(idx.index_of(5.0), Some(2));
    }

    #[test]
    fn index_of_unknown_label() {
        let idx = LabelIndex::from_labels(&[1.0, 2.0]);
        assert_eq!(idx.index_of(3.0), None);
    }

    #[test]
    fn label_of_inverts_index_of() {
        let idx = LabelIndex::from_labels(&[10.0, -4.0, 0.5]);
        for (i, &label) in idx.labels().iter().enumerate() {
            assert_eq!(idx.index_of(label), Some(i));
            assert!((idx.label_of(i) - label).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn negative_labels_sort_first() {
        let idx = LabelIndex::from_labels(&[1.0, -1.0]);
        assert_eq!(idx.index_of(-1.0), Some(0));
    }
}
