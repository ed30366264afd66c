//! Confidential sealed-bid matching task.
//!
//! This binary is the single-shot entry point run inside the isolated
//! environment: it loads `input.json` from the input directory, runs the
//! matching engine, and writes `output.json` plus the `computed.json`
//! completion marker to the output directory. Any failure writes a
//! diagnostic to stderr and exits non-zero with no output file written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use sealed_types::wire::{CompletionMarker, MatchReport, TaskInput};

/// Name of the released output document inside the output directory.
const OUTPUT_FILE: &str = "output.json";
/// Name of the completion marker consumed by the enclosing runtime.
const MARKER_FILE: &str = "computed.json";

#[derive(Parser)]
#[command(name = "sealed-task")]
#[command(about = "Confidential sealed-bid matching task")]
struct Cli {
    /// Directory containing input.json
    #[arg(long, env = "IEXEC_IN", default_value = "/iexec_in")]
    input_dir: PathBuf,

    /// Directory where output.json and the completion marker are written
    #[arg(long, env = "IEXEC_OUT", default_value = "/iexec_out")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sealed_task=info".parse()?)
                .add_directive("sealed_engine=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let input = load_input(&cli.input_dir)?;
    let report = sealed_engine::run(&input)?;
    write_output(&cli.output_dir, &report)?;

    info!(status = ?report.status, "matching task complete");
    if let Some(winner) = &report.winner {
        info!(winner = %winner, winning_price = report.winning_price, "result released");
    }

    Ok(())
}

fn load_input(input_dir: &Path) -> Result<TaskInput> {
    let path = input_dir.join("input.json");
    let raw = fs::read(&path)
        .with_context(|| format!("input.json not found in {}", input_dir.display()))?;
    serde_json::from_slice(&raw)
        .with_context(|| format!("Invalid input document {}", path.display()))
}

fn write_output(output_dir: &Path, report: &MatchReport) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let output_path = output_dir.join(OUTPUT_FILE);
    let encoded = serde_json::to_vec_pretty(report)?;
    fs::write(&output_path, encoded)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    let marker = CompletionMarker {
        deterministic_output_path: OUTPUT_FILE.to_string(),
    };
    let marker_path = output_dir.join(MARKER_FILE);
    fs::write(&marker_path, serde_json::to_vec(&marker)?)
        .with_context(|| format!("Failed to write {}", marker_path.display()))?;

    Ok(())
}
