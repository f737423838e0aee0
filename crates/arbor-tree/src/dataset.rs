//! Labeled example storage.

use crate::error::TreeError;

/// An immutable set of labeled examples.
///
/// `features[example_index][feature_index]` is row-major; `labels[i]` is the
/// trailing class label of example `i`. Every row has the same width and
/// every value is finite.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
    n_features: usize,
}

impl Dataset {
    /// Create a dataset from feature rows and their labels.
    ///
    /// # Errors
    ///
    /// | Variant                               | When                                  |
    /// |---------------------------------------|---------------------------------------|
    /// | [`TreeError::EmptyDataset`]           | `features` is empty                   |
    /// | [`TreeError::LabelCountMismatch`]     | `labels.len() != features.len()`      |
    /// | [`TreeError::ZeroFeatures`]           | rows have zero feature columns        |
    /// | [`TreeError::FeatureCountMismatch`]   | rows have inconsistent lengths        |
    /// | [`TreeError::NonFiniteValue`]         | any feature or label is NaN/infinite  |
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Self, TreeError> {
        if features.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        if labels.len() != features.len() {
            return Err(TreeError::LabelCountMismatch {
                n_rows: features.len(),
                n_labels: labels.len(),
            });
        }

        let n_features = features[0].len();
        if n_features == 0 {
            return Err(TreeError::ZeroFeatures);
        }

        for (example_index, (row, label)) in features.iter().zip(&labels).enumerate() {
            if row.len() != n_features {
                return Err(TreeError::FeatureCountMismatch {
                    expected: n_features,
                    got: row.len(),
                    example_index,
                });
            }
            if let Some(column) = row.iter().position(|v| !v.is_finite()) {
                return Err(TreeError::NonFiniteValue {
                    example_index,
                    column,
                });
            }
            if !label.is_finite() {
                return Err(TreeError::NonFiniteValue {
                    example_index,
                    column: n_features,
                });
            }
        }

        Ok(Self {
            features,
            labels,
            n_features,
        })
    }

    /// Create a dataset from rows whose last value is the class label.
    ///
    /// # Errors
    ///
    /// Same as [`Dataset::new`]; a row holding only a label reports
    /// [`TreeError::ZeroFeatures`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, TreeError> {
        let mut features = Vec::with_capacity(rows.len());
        let mut labels = Vec::with_capacity(rows.len());
        for (example_index, mut row) in rows.into_iter().enumerate() {
            match row.pop() {
                Some(label) => labels.push(label),
                None if example_index == 0 => return Err(TreeError::ZeroFeatures),
                None => {
                    return Err(TreeError::FeatureCountMismatch {
                        expected: features.first().map_or(0, Vec::len),
                        got: 0,
                        example_index,
                    });
                }
            }
            features.push(row);
        }
        Self::new(features, labels)
    }

    /// Return the feature rows.
    #[must_use]
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Return the feature row of one example.
    #[must_use]
    pub fn row(&self, example_index: usize) -> &[f64] {
        &self.features[example_index]
    }

    /// Return the value of `feature` for one example.
    #[must_use]
    pub fn value(&self, example_index: usize, feature: usize) -> f64 {
        self.features[example_index][feature]
    }

    /// Return the class labels.
    #[must_use]
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Return the label of one example.
    #[must_use]
    pub fn label(&self, example_index: usize) -> f64 {
        self.labels[example_index]
    }

    /// Return the number of examples.
    #[must_use]
    pub fn n_examples(&self) -> usize {
        self.labels.len()
    }

    /// Return the number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Return the indices of every example, `0..n_examples`.
    #[must_use]
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.n_examples()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_splits_trailing_label() {
        let ds = Dataset::from_rows(vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
        assert_eq!(ds.n_examples(), 2);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.row(1), &[3.0, 4.0]);
        assert_eq!(ds.labels(), &[2.0, 5.0]);
    }

    #[test]
    fn empty_dataset_error() {
        let err = Dataset::from_rows(vec![]).unwrap_err();
        assert!(matches!(err, TreeError::EmptyDataset));
    }

    #[test]
    fn label_only_rows_have_zero_features() {
        let err = Dataset::from_rows(vec![vec![1.0], vec![0.0]]).unwrap_err();
        assert!(matches!(err, TreeError::ZeroFeatures));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Dataset::from_rows(vec![vec![1.0, 2.0, 0.0], vec![1.0, 0.0]]).unwrap_err();
        assert!(matches!(
            err,
            TreeError::FeatureCountMismatch {
                expected: 2,
                got: 1,
                example_index: 1
            }
        ));
    }

    #[test]
    fn non_finite_feature_rejected() {
        let err = Dataset::new(vec![vec![1.0, f64::NAN]], vec![0.0]).unwrap_err();
        assert!(matches!(
            err,
            TreeError::NonFiniteValue {
                example_index: 0,
                column: 1
            }
        ));
    }

    #[test]
    fn non_finite_label_reports_label_column() {
        let err = Dataset::new(vec![vec![1.0, 2.0]], vec![f64::INFINITY]).unwrap_err();
        assert!(matches!(err, TreeError::NonFiniteValue { column: 2, .. }));
    }

    #[test]
    fn label_count_mismatch() {
        let err = Dataset::new(vec![vec![1.0], vec![2.0]], vec![0.0]).unwrap_err();
        assert!(matches!(
            err,
            TreeError::LabelCountMismatch {
                n_rows: 2,
                n_labels: 1
            }
        ));
    }
}
