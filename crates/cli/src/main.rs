//! markfix command-line tool.
//!
//! Applies marker-delimited line transformations to a single text file:
//! `dedupe` removes a block accidentally duplicated between two occurrences
//! of a sentinel comment, `resolve` strips version-control conflict markers
//! keeping the incoming side.
//!
//! Both subcommands overwrite the target file in place by default; `--dry-run`
//! previews the change and `--backup` keeps a `.bak` copy of the original.

mod style;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use markfix_core::{
    excise_duplicate_block, resolve_conflicts, ConflictMarkers, Document, ExciseOutcome,
    WriteMode,
};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// markfix command-line tool.
#[derive(Parser, Debug)]
#[command(
    name = "markfix",
    version,
    about = "Marker-delimited line transformations for text files"
)]
struct Cli {
    /// Show what would change without writing anything.
    #[arg(long, global = true, conflicts_with = "backup")]
    dry_run: bool,

    /// Keep a copy of the original at <FILE>.bak before overwriting.
    #[arg(long, global = true)]
    backup: bool,

    /// Print a machine-readable JSON report instead of styled text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove a duplicated block delimited by two occurrences of a marker.
    Dedupe {
        /// The text file to edit.
        file: PathBuf,

        /// Literal marker substring delimiting the duplicated block.
        #[arg(short, long)]
        marker: String,
    },

    /// Strip conflict markers, keeping the incoming side of each region.
    Resolve {
        /// The text file to edit.
        file: PathBuf,

        /// Prefix token that opens a conflict region.
        #[arg(long, default_value = "<<<<<<<")]
        begin: String,

        /// Prefix token separating the head and incoming sections.
        #[arg(long, default_value = "=======")]
        separator: String,

        /// Prefix token that closes a conflict region.
        #[arg(long, default_value = ">>>>>>>")]
        end: String,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    // Minimal logging for CLI
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mode = if cli.dry_run {
        WriteMode::DryRun
    } else if cli.backup {
        WriteMode::Backup
    } else {
        WriteMode::InPlace
    };

    match cli.command {
        Commands::Dedupe { file, marker } => cmd_dedupe(&file, &marker, mode, cli.json),
        Commands::Resolve {
            file,
            begin,
            separator,
            end,
        } => {
            let markers = ConflictMarkers {
                begin,
                separator,
                end,
            };
            cmd_resolve(&file, &markers, mode, cli.json)
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_dedupe(path: &Path, marker: &str, mode: WriteMode, json: bool) -> Result<()> {
    let doc = Document::read(path).context("failed to read target file")?;
    let (fixed, outcome) = excise_duplicate_block(&doc, marker);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome {
        ExciseOutcome::NotEnoughMarkers { found } => {
            // No-op: the file is left untouched.
            if !json {
                println!(
                    "{}",
                    style::warn(&format!(
                        "did not find 2 occurrences of the marker (found {}), file unchanged",
                        found
                    ))
                );
            }
            Ok(())
        }
        ExciseOutcome::Removed {
            start_line,
            end_line,
            lines_removed,
        } => {
            let backup = fixed
                .commit(path, mode)
                .context("failed to commit transformed file")?;

            if !json {
                if mode == WriteMode::DryRun {
                    println!(
                        "{}",
                        style::dim(&format!(
                            "dry run: would delete lines {}-{} ({} line(s)) from {}",
                            start_line,
                            end_line,
                            lines_removed,
                            path.display()
                        ))
                    );
                } else {
                    println!(
                        "{}",
                        style::success(&format!(
                            "deleted lines {}-{} ({} line(s)) from {}",
                            start_line,
                            end_line,
                            lines_removed,
                            path.display()
                        ))
                    );
                    if let Some(backup_path) = backup {
                        println!(
                            "{}",
                            style::dim(&format!("original kept at {}", backup_path.display()))
                        );
                    }
                }
            }
            Ok(())
        }
    }
}

fn cmd_resolve(path: &Path, markers: &ConflictMarkers, mode: WriteMode, json: bool) -> Result<()> {
    let doc = Document::read(path).context("failed to read target file")?;
    let (resolved, report) = resolve_conflicts(&doc, markers);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if !report.changed() {
        if !json {
            println!(
                "{}",
                style::warn("no conflict markers found, file unchanged")
            );
        }
        return Ok(());
    }

    let backup = resolved
        .commit(path, mode)
        .context("failed to commit transformed file")?;

    if !json {
        if mode == WriteMode::DryRun {
            println!(
                "{}",
                style::dim(&format!(
                    "dry run: would resolve {} conflict region(s), discarding {} line(s) in {}",
                    report.regions_resolved,
                    report.lines_discarded,
                    path.display()
                ))
            );
        } else {
            println!(
                "{}",
                style::success(&format!(
                    "resolved {} conflict region(s), discarded {} line(s) in {}",
                    report.regions_resolved,
                    report.lines_discarded,
                    path.display()
                ))
            );
            if let Some(backup_path) = backup {
                println!(
                    "{}",
                    style::dim(&format!("original kept at {}", backup_path.display()))
                );
            }
        }
    }

    Ok(())
}
