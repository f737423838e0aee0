use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use arbor_io::{DiagnosticPrinter, EvaluationReport, ExampleReader, ReportWriter};
use arbor_tree::TrainingMode;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Entropy decision trees and randomized forests for numeric classification")]
#[command(version)]
struct Cli {
    /// Training examples: whitespace-separated features, label last
    training_file: PathBuf,

    /// Test examples, same layout as the training file
    test_file: PathBuf,

    /// "optimized", "randomized", or a tree count N for a randomized forest
    mode: String,

    /// Nodes reached by fewer examples than this become leaves
    pruning_threshold: usize,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all logging except errors
    #[arg(long)]
    quiet: bool,

    /// Number of threads for parallel prediction (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Write a JSON evaluation report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print a JSON run summary after the diagnostic lines
    #[arg(long)]
    summary: bool,
}

// --- JSON stdout output struct ---

#[derive(Serialize)]
struct RunSummary {
    mode: String,
    pruning_threshold: usize,
    seed: u64,
    n_train: usize,
    n_test: usize,
    n_features: usize,
    n_classes: usize,
    n_trees: usize,
    n_nodes: usize,
    accuracy: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    let mode: TrainingMode = cli
        .mode
        .parse()
        .with_context(|| format!("invalid training mode: {}", cli.mode))?;

    let train = ExampleReader::new(&cli.training_file)
        .read()
        .with_context(|| format!("failed to read training file {}", cli.training_file.display()))?;
    let test = ExampleReader::new(&cli.test_file)
        .read()
        .with_context(|| format!("failed to read test file {}", cli.test_file.display()))?;

    let forest = mode
        .config()?
        .with_pruning_threshold(cli.pruning_threshold)
        .with_seed(cli.seed)
        .fit(&train);

    let evaluation = forest
        .evaluate(&test)
        .context("failed to evaluate the test file")?;

    let stdout = io::stdout();
    let mut printer = DiagnosticPrinter::new(stdout.lock());
    printer.print_forest(&forest)?;
    printer.print_evaluation(&evaluation)?;
    drop(printer);

    if let Some(path) = &cli.report {
        let report = EvaluationReport::new(mode, cli.seed, train.n_examples(), &forest, &evaluation);
        ReportWriter::new(path)?
            .write(&report)
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    if cli.summary {
        let output = RunSummary {
            mode: mode.to_string(),
            pruning_threshold: cli.pruning_threshold,
            seed: cli.seed,
            n_train: train.n_examples(),
            n_test: test.n_examples(),
            n_features: forest.n_features(),
            n_classes: forest.n_classes(),
            n_trees: forest.n_trees(),
            n_nodes: forest.trees().iter().map(|t| t.n_nodes()).sum(),
            accuracy: evaluation.accuracy(),
        };
        let mut out = io::stdout().lock();
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    }

    info!(accuracy = evaluation.accuracy(), "run complete");
    Ok(())
}
