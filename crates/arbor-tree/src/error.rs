/// Errors from decision tree and forest operations.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Returned when a forest is requested with zero trees.
    #[error("n_trees must be at least 1, got {n_trees}")]
    InvalidTreeCount {
        /// The invalid n_trees value provided.
        n_trees: usize,
    },

    /// Returned when a training mode string is not recognized.
    #[error("unknown training mode \"{mode}\" (expected optimized, randomized, or a tree count)")]
    UnknownTrainingMode {
        /// The unrecognized mode string.
        mode: String,
    },

    /// Returned when a dataset has zero examples.
    #[error("dataset has zero examples")]
    EmptyDataset,

    /// Returned when a dataset has zero feature columns.
    #[error("dataset has zero feature columns")]
    ZeroFeatures,

    /// Returned when the number of labels differs from the number of feature rows.
    #[error("dataset has {n_rows} feature rows but {n_labels} labels")]
    LabelCountMismatch {
        /// Number of feature rows.
        n_rows: usize,
        /// Number of labels.
        n_labels: usize,
    },

    /// Returned when an example has a different number of features than expected.
    #[error("example {example_index} has {got} features, expected {expected}")]
    FeatureCountMismatch {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features in the example.
        got: usize,
        /// The zero-based index of the offending example.
        example_index: usize,
    },

    /// Returned when an example has the wrong width at prediction time.
    #[error("prediction input has {got} features, expected {expected}")]
    PredictionFeatureMismatch {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features in the prediction input.
        got: usize,
    },

    /// Returned when a feature value or label is NaN or infinite.
    #[error("non-finite value at example {example_index}, column {column}")]
    NonFiniteValue {
        /// The zero-based index of the offending example.
        example_index: usize,
        /// The zero-based column (the label column is `n_features`).
        column: usize,
    },
}
