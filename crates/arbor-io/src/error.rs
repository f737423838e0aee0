//! I/O error types for arbor-io.

use std::path::PathBuf;

use arbor_tree::TreeError;

/// Errors from reading example files and writing diagnostics or reports.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a line cannot be read from an opened file.
    #[error("cannot read {path} at line {line}")]
    ReadLine {
        /// Path to the example file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a token is not a finite number.
    #[error("invalid value in {path}: line {line}, column {column}, raw value \"{raw}\"")]
    InvalidToken {
        /// Path to the example file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// 1-based token position within the line.
        column: usize,
        /// The raw token that failed to parse.
        raw: String,
    },

    /// Returned when a line has no feature before the label.
    #[error("line {line} of {path} has {got} value(s), need at least one feature and a label")]
    TooFewColumns {
        /// Path to the example file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Number of tokens on the line.
        got: usize,
    },

    /// Returned when a line has a different token count than the first example.
    #[error("inconsistent row length in {path}: line {line} has {got} values, expected {expected}")]
    InconsistentRowLength {
        /// Path to the example file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Token count of the first example.
        expected: usize,
        /// Token count of this line.
        got: usize,
    },

    /// Returned when the file holds no examples.
    #[error("empty dataset (no examples) in {path}")]
    EmptyDataset {
        /// Path to the example file.
        path: PathBuf,
    },

    /// Returned when the parsed rows fail dataset validation.
    #[error("invalid dataset in {path}")]
    Dataset {
        /// Path to the example file.
        path: PathBuf,
        /// Underlying validation error.
        source: TreeError,
    },

    /// Returned when diagnostic lines cannot be written.
    #[error("cannot write diagnostic output")]
    Diagnostics {
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a report cannot be serialized.
    #[error("cannot serialize report")]
    Serialize {
        /// Underlying serde_json error.
        source: serde_json::Error,
    },

    /// Returned when the report's parent directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a report file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
