//! Framelift: lowers design-tool documents into a semantic IR.
//!
//! Framelift takes the node tree a design tool's REST API returns and
//! lowers it, through a fixed sequence of passes, into an intermediate
//! representation suitable for deterministic code generation: filtered
//! nodes, inferred flex-like layout, semantic variants, deduplicated
//! styles and tokens, and detection hints for lists, repeated blocks,
//! modal overlays and component variants.
//!
//! # Modules
//!
//! - [`raw`]: Raw document input model and JSON reading
//! - [`normalize`]: Tree filtering and pruning
//! - [`layout`]: Layout-type inference, sizing and constraint mapping
//! - [`classify`]: Semantic classification into IR variants
//! - [`style`]: Style extraction and token collection
//! - [`detect`]: List, repetition, overlay and variant detectors
//! - [`pipeline`]: The stage orchestrator
//! - [`ir`]: The IR model and JSON output
//! - [`summary`]: Displayable run summaries
//! - [`error`]: Error types for framelift operations

pub mod classify;
pub mod detect;
pub mod error;
pub mod ir;
pub mod layout;
pub mod normalize;
pub mod pipeline;
pub mod raw;
pub mod style;
pub mod summary;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::FrameliftError;

use normalize::NormalizeOptions;

/// The framelift CLI application.
#[derive(Parser)]
#[command(name = "framelift")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Lower a raw document into IR, styles and detection hints.
    Lower(LowerArgs),

    /// Lower a raw document and print a summary of the result.
    Inspect(InspectArgs),
}

/// Arguments for the lower subcommand.
#[derive(clap::Args)]
struct LowerArgs {
    /// Raw document JSON, as fetched from the design tool's API.
    input: PathBuf,

    /// Output format ('ir-json' or 'summary').
    #[arg(long, default_value = "ir-json")]
    output: String,

    /// Write the IR JSON to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Wildcard name patterns to ignore (replaces the defaults).
    #[arg(long = "ignore")]
    ignore: Vec<String>,

    /// Node ids to exclude, e.g. from an upstream safe-area detector.
    #[arg(long = "exclude-id")]
    exclude_ids: Vec<String>,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Raw document JSON, as fetched from the design tool's API.
    input: PathBuf,

    /// Wildcard name patterns to ignore (replaces the defaults).
    #[arg(long = "ignore")]
    ignore: Vec<String>,

    /// Node ids to exclude, e.g. from an upstream safe-area detector.
    #[arg(long = "exclude-id")]
    exclude_ids: Vec<String>,
}

/// Run the framelift CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), FrameliftError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Lower(args)) => run_lower(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("framelift {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Lowers design-tool documents into a semantic IR.");
            println!();
            println!("Run 'framelift --help' for usage information.");
            Ok(())
        }
    }
}

fn normalize_options(ignore: Vec<String>, exclude_ids: Vec<String>) -> NormalizeOptions {
    let mut opts = NormalizeOptions::default();
    if !ignore.is_empty() {
        opts.ignore_patterns = ignore;
    }
    opts.exclude_ids = exclude_ids.into_iter().collect::<BTreeSet<String>>();
    opts
}

/// Execute the lower subcommand.
fn run_lower(args: LowerArgs) -> Result<(), FrameliftError> {
    let raw = raw::io_json::read_raw_json(&args.input)?;
    let opts = normalize_options(args.ignore, args.exclude_ids);
    let output = pipeline::lower(&raw, &opts);

    match args.output.as_str() {
        "ir-json" => {
            if let Some(path) = &args.out {
                ir::io_json::write_ir_json(path, &output)?;
            } else {
                let json = ir::io_json::to_json_string(&output)
                    .map_err(FrameliftError::IrJsonSerialize)?;
                println!("{}", json);
            }
        }
        "summary" => {
            print!("{}", summary::summarize(&output));
        }
        other => {
            return Err(FrameliftError::UnsupportedOutput(format!(
                "'{}' (supported: ir-json, summary)",
                other
            )));
        }
    }

    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), FrameliftError> {
    let raw = raw::io_json::read_raw_json(&args.input)?;
    let opts = normalize_options(args.ignore, args.exclude_ids);
    let output = pipeline::lower(&raw, &opts);

    print!("{}", summary::summarize(&output));
    Ok(())
}
