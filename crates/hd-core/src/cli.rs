//! Command-line interface.
//!
//! Provides `infer`, `check` and `config show` subcommands. Results go to
//! stdout in the selected format; errors are reported on stderr (text) or as a
//! JSON error object on stdout (json) and mapped to stable exit codes.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use hd_common::{OutputFormat, Result, SCHEMA_VERSION};
use hd_config::{resolve_probs, ResolvedProbs};
use serde::Serialize;
use tracing::debug;

use crate::exit_codes::ExitCode;
use crate::inference::{HypothesisSpace, InferenceConfig, InferenceEngine, DEFAULT_MAX_PEOPLE};
use crate::loader::load_pedigree;
use crate::output;

/// Exact inference of gene and trait distributions across a family pedigree.
#[derive(Parser, Debug)]
#[command(name = "heredity", version, about)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute posterior gene and trait distributions for every person
    Infer(InferArgs),
    /// Load and validate a pedigree without running inference
    Check {
        /// Pedigree CSV (name,mother,father,trait)
        data: PathBuf,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Arguments for the infer command
#[derive(Args, Debug)]
pub struct InferArgs {
    /// Pedigree CSV (name,mother,father,trait)
    pub data: PathBuf,

    /// Probability tables JSON (overrides HEREDITY_PROBS and the user config)
    #[arg(long, value_name = "FILE")]
    pub probs: Option<PathBuf>,

    /// Refuse pedigrees with more people than this
    #[arg(long, default_value_t = DEFAULT_MAX_PEOPLE)]
    pub max_people: usize,

    /// Include run counters in JSON output
    #[arg(long)]
    pub stats: bool,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the resolved probability tables and where they came from
    Show {
        /// Probability tables JSON
        #[arg(long, value_name = "FILE")]
        probs: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct CheckReport<'a> {
    status: &'static str,
    schema_version: &'static str,
    data: &'a Path,
    people: usize,
    founders: usize,
    observed: usize,
    hypotheses: u128,
}

#[derive(Serialize)]
struct ErrorReport {
    status: &'static str,
    schema_version: &'static str,
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: u32,
    message: String,
}

/// Execute a parsed command line, printing results, and return the exit code.
pub fn run(cli: &Cli) -> ExitCode {
    let result = match &cli.command {
        Commands::Infer(args) => run_infer(args, cli.format),
        Commands::Check { data } => run_check(data, cli.format),
        Commands::Config {
            command: ConfigCommands::Show { probs },
        } => run_config_show(probs.as_deref(), cli.format),
    };

    match result {
        Ok(out) => {
            print!("{out}");
            ExitCode::Clean
        }
        Err(err) => {
            let code = ExitCode::from(&err);
            debug!(error = %err, exit_code = code.as_i32(), "command failed");
            match cli.format {
                OutputFormat::Text => eprintln!("error: {err}"),
                OutputFormat::Json => {
                    let report = ErrorReport {
                        status: "error",
                        schema_version: SCHEMA_VERSION,
                        error: ErrorBody {
                            code: err.code(),
                            message: err.to_string(),
                        },
                    };
                    match serde_json::to_string_pretty(&report) {
                        Ok(json) => println!("{json}"),
                        Err(_) => eprintln!("error: {err}"),
                    }
                }
            }
            code
        }
    }
}

fn run_infer(args: &InferArgs, format: OutputFormat) -> Result<String> {
    let ResolvedProbs { source, tables } = resolve_probs(args.probs.as_deref())?;
    debug!(source = ?source, "using probability tables");
    let engine = InferenceEngine::new(
        tables,
        InferenceConfig {
            max_people: args.max_people,
        },
    )?;
    let pedigree = load_pedigree(&args.data)?;
    let outcome = engine.infer_with_stats(&pedigree)?;
    let stats = args.stats.then_some(&outcome.stats);
    output::render(&outcome.table, stats, format)
}

fn run_check(data: &Path, format: OutputFormat) -> Result<String> {
    let pedigree = load_pedigree(data)?;
    let report = CheckReport {
        status: "ok",
        schema_version: SCHEMA_VERSION,
        data,
        people: pedigree.len(),
        founders: pedigree.founder_count(),
        observed: pedigree.observed_count(),
        hypotheses: HypothesisSpace::new(&pedigree).len(),
    };
    match format {
        OutputFormat::Text => Ok(format!(
            "ok: {} people ({} founders, {} observed), {} admissible hypotheses\n",
            report.people, report.founders, report.observed, report.hypotheses
        )),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&report)?)),
    }
}

fn run_config_show(probs: Option<&Path>, format: OutputFormat) -> Result<String> {
    let resolved = resolve_probs(probs)?;
    match format {
        OutputFormat::Text => {
            let origin = match resolved.source.path() {
                Some(path) => path.display().to_string(),
                None => "built-in defaults".to_string(),
            };
            Ok(format!(
                "# source: {}\n{}\n",
                origin,
                serde_json::to_string_pretty(&resolved.tables)?
            ))
        }
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&resolved)?)),
    }
}
