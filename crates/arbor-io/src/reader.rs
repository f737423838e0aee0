//! Whitespace-separated example reader with full input validation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use arbor_tree::Dataset;
use tracing::{debug, info, instrument};

use crate::IoError;

/// Reads labelled examples from a text file.
///
/// Expected format:
/// - one example per line, tokens separated by any whitespace
/// - the last token is the class label, every earlier token is a feature
/// - every example has the same number of tokens
/// - blank lines are skipped
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::ReadLine`] | A line cannot be read (e.g. invalid UTF-8) |
/// | [`IoError::InvalidToken`] | Token is NaN, Inf, or not a number |
/// | [`IoError::TooFewColumns`] | Line has fewer than two tokens |
/// | [`IoError::InconsistentRowLength`] | Line has a different token count than the first example |
/// | [`IoError::EmptyDataset`] | No examples in the file |
#[derive(Debug)]
pub struct ExampleReader {
    path: PathBuf,
}

impl ExampleReader {
    /// Create a new reader for the given file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the file, returning a [`Dataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Dataset, IoError> {
        let file = File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut expected: Option<usize> = None;

        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|e| IoError::ReadLine {
                path: self.path.clone(),
                line: line_no,
                source: e,
            })?;

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            if tokens.len() < 2 {
                return Err(IoError::TooFewColumns {
                    path: self.path.clone(),
                    line: line_no,
                    got: tokens.len(),
                });
            }
            match expected {
                None => {
                    debug!(n_columns = tokens.len(), "first example read");
                    expected = Some(tokens.len());
                }
                Some(n) if n != tokens.len() => {
                    return Err(IoError::InconsistentRowLength {
                        path: self.path.clone(),
                        line: line_no,
                        expected: n,
                        got: tokens.len(),
                    });
                }
                Some(_) => {}
            }

            rows.push(self.parse_row(&tokens, line_no)?);
        }

        if rows.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let dataset = Dataset::from_rows(rows).map_err(|e| IoError::Dataset {
            path: self.path.clone(),
            source: e,
        })?;

        info!(
            n_examples = dataset.n_examples(),
            n_features = dataset.n_features(),
            "dataset loaded"
        );

        Ok(dataset)
    }

    fn parse_row(&self, tokens: &[&str], line: usize) -> Result<Vec<f64>, IoError> {
        tokens
            .iter()
            .enumerate()
            .map(|(col, raw)| match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(IoError::InvalidToken {
                    path: self.path.clone(),
                    line,
                    column: col + 1,
                    raw: (*raw).to_string(),
                }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn read_valid_examples() {
        let f = write_file("0.0 0.0 0\n0.0 1.0 0\n1.0 0.0 1\n1.0 1.0 1\n");
        let ds = ExampleReader::new(f.path()).read().unwrap();
        assert_eq!(ds.n_examples(), 4);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.row(2), &[1.0, 0.0]);
        assert!((ds.label(3) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mixed_whitespace_and_blank_lines() {
        let f = write_file("\n  1.5\t2.5   3\n\n\t\n-4e-1  7  2\n");
        let ds = ExampleReader::new(f.path()).read().unwrap();
        assert_eq!(ds.n_examples(), 2);
        assert!((ds.value(1, 0) + 0.4).abs() < 1e-12);
        assert!((ds.label(0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file() {
        let err = ExampleReader::new(Path::new("/nonexistent/train.txt"))
            .read()
            .unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn empty_file() {
        let f = write_file("\n   \n");
        let err = ExampleReader::new(f.path()).read().unwrap_err();
        assert!(matches!(err, IoError::EmptyDataset { .. }));
    }

    #[test]
    fn unparseable_token_names_line_and_column() {
        let f = write_file("1 2 0\n\n3 abc 1\n");
        let err = ExampleReader::new(f.path()).read().unwrap_err();
        match err {
            IoError::InvalidToken { line, column, raw, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, 2);
                assert_eq!(raw, "abc");
            }
            other => panic!("expected InvalidToken, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_token_rejected() {
        let f = write_file("1 NaN 0\n");
        let err = ExampleReader::new(f.path()).read().unwrap_err();
        assert!(matches!(err, IoError::InvalidToken { line: 1, column: 2, .. }));

        let f = write_file("1 2 inf\n");
        let err = ExampleReader::new(f.path()).read().unwrap_err();
        assert!(matches!(err, IoError::InvalidToken { line: 1, column: 3, .. }));
    }

    #[test]
    fn inconsistent_row_length() {
        let f = write_file("1 2 0\n1 2 3 0\n");
        let err = ExampleReader::new(f.path()).read().unwrap_err();
        assert!(matches!(
            err,
            IoError::InconsistentRowLength {
                line: 2,
                expected: 3,
                got: 4,
                ..
            }
        ));
    }

    #[test]
    fn label_only_line_rejected() {
        let f = write_file("1\n");
        let err = ExampleReader::new(f.path()).read().unwrap_err();
        assert!(matches!(err, IoError::TooFewColumns { line: 1, got: 1, .. }));
    }

    #[test]
    fn error_message_names_file() {
        let f = write_file("1 x 0\n");
        let err = ExampleReader::new(f.path()).read().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(&f.path().display().to_string()));
        assert!(msg.contains("line 1"));
    }
}
