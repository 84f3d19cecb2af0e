//! Driver (spec §4.8): bootstraps the tables, seeds the initial task,
//! spawns and joins the worker pool, and reports wall-clock timing.

use crate::dispatcher::{self, SharedState};
use crate::matrix::MatrixStore;
use crate::task_table::TaskTable;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tileqr_common::{Error, NumericStatus, TileConfig};

/// Outcome of a completed run: elapsed wall-clock time, the factored
/// matrix (still inside the `MatrixStore`, since ownership transfers back
/// to the caller), and the first numerical breakdown observed, if any.
pub struct RunReport {
    pub elapsed: Duration,
    pub matrix: MatrixStore,
    pub breakdown: Option<(usize, usize, NumericStatus)>,
}

pub struct Driver;

impl Driver {
    /// Factor `matrix` in place according to `config`. Spawns
    /// `config.num_threads` workers, seeds the Ready Queue with `(0, 0)`,
    /// joins all workers, and returns timing plus the (possibly breakdown-
    /// tainted) result.
    ///
    /// Returns `Err` only when `config.abort_on_breakdown` is set and a
    /// breakdown actually occurred (spec §7 kind 2, propagated as the
    /// "prefer early abort" resolution recorded in SPEC_FULL.md §9.3).
    /// Config validation is the caller's responsibility (`tileqr-cli` does
    /// it before ever constructing a `Driver`, since that is an input
    /// error — spec §7 kind 1 — not a driver concern).
    pub fn run(matrix: MatrixStore, config: &TileConfig) -> Result<RunReport, Error> {
        let table = TaskTable::build(matrix.rows(), matrix.cols(), config);
        let state = Arc::new(SharedState::new(
            matrix,
            table,
            config.use_priority_main_queue,
            config.abort_on_breakdown,
        ));

        // Seed the Ready Queue with the very first task, (0, 0).
        if let Some(seed) = state.table.get(0, 0) {
            state.ready.push(seed.clone());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(workers = config.num_threads, "spawning worker pool");

        let start = Instant::now();

        let handles: Vec<_> = (0..config.num_threads.max(1))
            .map(|_| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || dispatcher::run_worker(&state))
            })
            .collect();

        for handle in handles {
            handle.join().expect("tileqr worker thread panicked");
        }

        let elapsed = start.elapsed();

        #[cfg(feature = "tracing")]
        tracing::debug!(?elapsed, "all workers joined, final tile complete");

        let state = Arc::try_unwrap(state)
            .unwrap_or_else(|_| panic!("SharedState still shared after all workers joined"));

        let breakdown = state.breakdown.get().copied();

        if config.abort_on_breakdown {
            if let Some((i, j, status)) = breakdown {
                return Err(Error::NumericalBreakdown {
                    task_i: i,
                    task_j: j,
                    reason: format!("{status:?}"),
                });
            }
        }

        Ok(RunReport {
            elapsed,
            matrix: state.matrix,
            breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry_matrix_round_trips_through_driver() {
        let matrix = MatrixStore::new(1, 1, vec![5.0]);
        let config = TileConfig {
            alpha: 1,
            beta: 1,
            num_threads: 1,
            ..TileConfig::default()
        };
        let report = Driver::run(matrix, &config).unwrap();
        assert_eq!(report.matrix.get(0, 0), -5.0);
        assert!(report.breakdown.is_none());
    }

    #[test]
    fn identity_matrix_all_dependencies_complete() {
        let data = vec![
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        let matrix = MatrixStore::new(4, 4, data);
        let config = TileConfig {
            alpha: 1,
            beta: 1,
            num_threads: 2,
            ..TileConfig::default()
        };
        let report = Driver::run(matrix, &config).unwrap();
        for i in 0..4 {
            assert_eq!(report.matrix.get(i, i).abs(), 1.0);
        }
    }

    #[test]
    fn zero_column_surfaces_breakdown_without_aborting_by_default() {
        let data = vec![
            0.0, 1.0, 0.0, //
            0.0, 2.0, 0.0, //
            0.0, 3.0, 5.0,
        ];
        let matrix = MatrixStore::new(3, 3, data);
        let config = TileConfig {
            alpha: 1,
            beta: 1,
            num_threads: 2,
            ..TileConfig::default()
        };
        let report = Driver::run(matrix, &config).unwrap();
        assert!(matches!(
            report.breakdown,
            Some((0, 0, NumericStatus::ZeroNorm { pivot: 0 }))
        ));
    }

    #[test]
    fn abort_on_breakdown_propagates_error() {
        let data = vec![0.0, 1.0, 0.0, 2.0];
        let matrix = MatrixStore::new(2, 2, data);
        let config = TileConfig {
            alpha: 1,
            beta: 1,
            num_threads: 1,
            abort_on_breakdown: true,
            ..TileConfig::default()
        };
        let err = Driver::run(matrix, &config).unwrap_err();
        assert!(matches!(err, Error::NumericalBreakdown { .. }));
    }

    #[test]
    fn more_workers_than_tasks_still_terminates() {
        let matrix = MatrixStore::new(1, 1, vec![3.0]);
        let config = TileConfig {
            alpha: 1,
            beta: 1,
            num_threads: 16,
            ..TileConfig::default()
        };
        let report = Driver::run(matrix, &config).unwrap();
        assert_eq!(report.matrix.get(0, 0), -3.0);
    }
}
