//! Argument parsing (spec §6 CLI surface, expanded in SPEC_FULL.md §6).

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tileqr", about = "Parallel, dynamic, tile-based Householder QR")]
pub struct Cli {
    /// Path to the input matrix (tileqr-io's text format: "m n" header,
    /// then m lines of n space-separated doubles).
    pub matrix_file: PathBuf,

    /// Optional TOML config file, merged under any CLI flags given.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long)]
    pub alpha: Option<u32>,

    #[arg(long)]
    pub beta: Option<u32>,

    /// Use the FIFO-only Ready Queue instead of the priority-ordered one.
    #[arg(long)]
    pub no_priority: bool,

    /// Write the factored matrix back out through this path.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Abort the run as soon as a numerical breakdown is detected, instead
    /// of continuing with undefined downstream values (spec §7/§9).
    #[arg(long)]
    pub abort_on_breakdown: bool,
}
