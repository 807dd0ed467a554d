use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use hybridsort::common::reset_sigpipe;
use hybridsort::engine::{Backend, EngineConfig, Gather};
use hybridsort::micro::Algorithm;
use hybridsort::sort::{CheckMode, Outcome, SortConfig, parse_count, sort_and_output};

#[derive(Parser)]
#[command(
    name = "fhsort",
    about = "Sort integers with the parallel hybrid sort engine"
)]
struct Cli {
    /// Partitioning strategy: bucket, counting or merge
    #[arg(short = 'g', long = "gather", default_value = "counting")]
    gather: Gather,

    /// Per-bucket algorithm: comparison or radix
    #[arg(short = 'a', long = "algorithm", default_value = "radix")]
    algorithm: Algorithm,

    /// Parallel backend: fork-join or task-queue
    #[arg(short = 'B', long = "backend", default_value = "fork-join")]
    backend: Backend,

    /// Number of worker threads (default: one per hardware thread)
    #[arg(long = "parallel", value_name = "N")]
    parallel: Option<usize>,

    /// Sort inputs shorter than N values on one thread (suffixes K, M, G)
    #[arg(short = 'T', long = "threshold", value_name = "N")]
    threshold: Option<String>,

    /// Values are unsigned 32-bit integers
    #[arg(short = 'u', long = "unsigned")]
    unsigned: bool,

    /// Print each value with its 0-based input line number
    #[arg(short = 'i', long = "indexed")]
    indexed: bool,

    /// Check for sorted input; do not sort
    #[arg(short = 'c', long = "check", default_missing_value = "diagnose", num_args = 0..=1)]
    check: Option<String>,

    /// Like -c, but do not report the first bad line
    #[arg(short = 'C')]
    check_quiet: bool,

    /// Write result to FILE instead of standard output
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,

    /// Line delimiter is NUL, not newline
    #[arg(short = 'z', long = "zero-terminated")]
    zero_terminated: bool,

    /// Files to sort
    files: Vec<String>,
}

fn build_config(cli: Cli) -> Result<(SortConfig, Vec<String>)> {
    let mut engine = EngineConfig {
        workers: cli.parallel,
        backend: cli.backend,
        ..EngineConfig::default()
    };
    if let Some(ref s) = cli.threshold {
        engine.sequential_threshold = parse_count(s)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid threshold '{}'", s))?;
    }

    let check = if cli.check_quiet {
        CheckMode::Quiet
    } else if let Some(ref val) = cli.check {
        match val.as_str() {
            "quiet" | "silent" => CheckMode::Quiet,
            _ => CheckMode::Diagnose,
        }
    } else {
        CheckMode::None
    };

    let config = SortConfig {
        engine,
        gather: cli.gather,
        algorithm: cli.algorithm,
        unsigned: cli.unsigned,
        indexed: cli.indexed,
        check,
        output_file: cli.output,
        zero_terminated: cli.zero_terminated,
    };

    let inputs = if cli.files.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.files
    };
    Ok((config, inputs))
}

fn main() {
    reset_sigpipe();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let (config, inputs) = match build_config(cli) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("fhsort: {:#}", e);
            process::exit(2);
        }
    };

    match sort_and_output(&inputs, &config) {
        Ok(Outcome::Disorder { line, value }) => {
            if config.check == CheckMode::Diagnose {
                let name = if inputs.len() == 1 { inputs[0].as_str() } else { "-" };
                eprintln!("fhsort: {}:{}: disorder: {}", name, line, value);
            }
            process::exit(1);
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("fhsort: {}", e);
            process::exit(2);
        }
    }
}
