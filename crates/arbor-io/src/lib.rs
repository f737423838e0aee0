//! File I/O, diagnostic printing, and JSON reports for arbor.

mod error;
mod printer;
mod reader;
mod report;

pub use error::IoError;
pub use printer::DiagnosticPrinter;
pub use reader::ExampleReader;
pub use report::{EvaluationReport, ReportWriter, TreeSummary};
