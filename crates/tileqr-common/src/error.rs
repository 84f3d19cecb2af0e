//! Crate-wide error type.
//!
//! Only the two fatal-before-workers-start kinds from spec §7 live here
//! (`Config`, `Io`) plus the one recoverable-but-reportable kind, numerical
//! breakdown. Protocol
//! errors (double completion, missing task lookup) are deliberately not
//! variants of this enum — spec §7 calls those scheduler bugs, and they are
//! raised as `panic!`/`assert!` at the point of violation instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("alpha must be positive, got {0}")]
    NonPositiveAlpha(u32),
    #[error("beta must be positive, got {0}")]
    NonPositiveBeta(u32),
    #[error("beta ({beta}) must be an integer multiple of alpha ({alpha})")]
    BetaNotMultipleOfAlpha { alpha: u32, beta: u32 },
    #[error("num_threads must be at least 1, got {0}")]
    ZeroThreads(usize),
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] tileqr_io::IoError),

    #[error("numerical breakdown in panel task ({task_i}, {task_j}): {reason}")]
    NumericalBreakdown {
        task_i: usize,
        task_j: usize,
        reason: String,
    },
}
