//! Property tests for the scheduler-level invariants in spec §8: task
//! uniqueness (enforced by `DependencyTable::set`'s panic-on-double-set,
//! exercised here via many concurrent runs), and reconstruction accuracy
//! across a spread of shapes, tile parameters, and worker counts.

use proptest::prelude::*;
use tileqr_common::TileConfig;
use tileqr_core::{Driver, MatrixStore};
use tileqr_testkit::gram_residual;

fn divisors_up_to(n: u32) -> Vec<u32> {
    (1..=n).filter(|d| n % d == 0).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// For any square matrix up to 12x12, any valid (alpha, beta) tiling,
    /// and any worker count up to 8, the run either completes with a
    /// reconstruction residual within tolerance or reports a breakdown —
    /// it never panics and never leaves dependencies half-satisfied (a
    /// protocol violation would itself panic inside `DependencyTable::set`
    /// or `TaskTable::build`'s uniqueness assertion).
    #[test]
    fn factorization_completes_or_reports_breakdown(
        size in 1usize..12,
        seed in any::<u64>(),
        beta in 1u32..6,
        threads in 1usize..8,
    ) {
        let beta = beta.min(size as u32).max(1);
        let alpha = *divisors_up_to(beta).first().unwrap_or(&1);

        let (m, n, data) = tileqr_testkit::seeded_random(size, size, seed);
        let matrix = MatrixStore::new(m, n, data.clone());
        let config = TileConfig {
            alpha,
            beta,
            num_threads: threads,
            ..TileConfig::default()
        };

        let report = Driver::run(matrix, &config).unwrap();

        if report.breakdown.is_none() {
            let residual = gram_residual(&data, &report.matrix.to_vec(), m, n);
            let scale = gram_residual(&data, &vec![0.0; m * n], m, n).max(1.0);
            prop_assert!(residual < 1e-4 * scale, "residual {residual} too large relative to scale {scale}");
        }
    }

    /// Rectangular (tall, m >= n) matrices behave the same way — the task
    /// grid's column count is derived from `m` (spec §3), so only the
    /// tall/square regime is meaningfully covered by this scheduler.
    #[test]
    fn tall_rectangular_matrices_complete_or_report_breakdown(
        cols in 2usize..8,
        extra_rows in 0usize..10,
        seed in any::<u64>(),
    ) {
        let rows = cols + extra_rows;
        let (m, n, data) = tileqr_testkit::seeded_random(rows, cols, seed);
        let matrix = MatrixStore::new(m, n, data.clone());
        let config = TileConfig {
            alpha: 1,
            beta: 1,
            num_threads: 4,
            ..TileConfig::default()
        };

        let report = Driver::run(matrix, &config).unwrap();

        if report.breakdown.is_none() {
            let residual = gram_residual(&data, &report.matrix.to_vec(), m, n);
            prop_assert!(residual.is_finite());
        }
    }
}
