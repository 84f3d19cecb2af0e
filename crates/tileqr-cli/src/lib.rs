pub mod cli;

use cli::Cli;
use std::process::ExitCode;
use tileqr_common::TileConfig;
use tileqr_core::Driver;
use tileqr_io::{MatrixSink, MatrixSource, TextMatrix};

/// Resolve a `TileConfig` from compiled-in defaults, an optional TOML file,
/// and CLI flag overrides, in that precedence order (SPEC_FULL.md §4.9).
pub fn resolve_config(cli: &Cli) -> Result<TileConfig, tileqr_common::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => TileConfig::from_toml_file(path)?,
        None => TileConfig::default(),
    };

    if let Some(threads) = cli.threads {
        config.num_threads = threads;
    }
    if let Some(alpha) = cli.alpha {
        config.alpha = alpha;
    }
    if let Some(beta) = cli.beta {
        config.beta = beta;
    }
    if cli.no_priority {
        config.use_priority_main_queue = false;
    }
    if cli.abort_on_breakdown {
        config.abort_on_breakdown = true;
    }
    if let Some(output) = &cli.output {
        config.output_path = Some(output.display().to_string());
    }

    config.validate()?;
    Ok(config)
}

/// Run the whole pipeline: load, factor, report, optionally save. Returns
/// the process exit code per spec §6/§7 rather than calling
/// `std::process::exit` directly, so this stays testable.
pub fn run(cli: Cli) -> ExitCode {
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::from(2);
        }
    };

    let source = TextMatrix::new(&cli.matrix_file);
    let (m, n, data) = match source.load() {
        Ok(loaded) => loaded,
        Err(err) => {
            tracing::error!(error = %err, "failed to load matrix");
            return ExitCode::from(3);
        }
    };

    tracing::debug!(m, n, threads = config.num_threads, "starting factorization");

    let matrix = tileqr_core::MatrixStore::new(m, n, data);
    let report = match Driver::run(matrix, &config) {
        Ok(report) => report,
        Err(tileqr_common::Error::NumericalBreakdown { task_i, task_j, reason }) => {
            tracing::warn!(task_i, task_j, reason, "numerical breakdown, aborting");
            return ExitCode::from(1);
        }
        Err(other) => {
            // Every other `Error` variant is a config/IO failure caught
            // above; reaching here is a scheduler protocol bug.
            panic!("unexpected error from Driver::run: {other}");
        }
    };

    println!("elapsed: {:?}", report.elapsed);

    if let Some(output) = &cli.output {
        let sink = TextMatrix::new(output);
        let data = report.matrix.to_vec();
        if let Err(err) = sink.save(m, n, &data) {
            tracing::error!(error = %err, "failed to write output matrix");
            return ExitCode::from(3);
        }
    }

    ExitCode::SUCCESS
}
