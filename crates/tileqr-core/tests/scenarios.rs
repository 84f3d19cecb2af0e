//! The six literal end-to-end scenarios from spec §8, run through the full
//! Driver (task table, dependency table, dual queues, worker pool) rather
//! than the kernels directly.

use tileqr_common::{NumericStatus, TileConfig};
use tileqr_core::{Driver, MatrixStore};
use tileqr_testkit::{gram_residual, scenarios};

fn config(alpha: u32, beta: u32, num_threads: usize) -> TileConfig {
    TileConfig {
        alpha,
        beta,
        num_threads,
        ..TileConfig::default()
    }
}

#[test]
fn scenario_1_identity_4x4() {
    let (m, n, data) = scenarios::identity_4x4();
    let matrix = MatrixStore::new(m, n, data.clone());
    let report = Driver::run(matrix, &config(1, 1, 1)).unwrap();
    assert!(report.breakdown.is_none());
    let residual = gram_residual(&data, &report.matrix.to_vec(), m, n);
    assert!(residual < 1e-9, "residual {residual} too large");
}

#[test]
fn scenario_2_diagonal_matrix_k1_two_workers() {
    let (m, n, data) = scenarios::diagonal_k1();
    let matrix = MatrixStore::new(m, n, data);
    let report = Driver::run(matrix, &config(1, 1, 2)).unwrap();
    assert!(report.breakdown.is_none());
    for i in 0..n {
        assert_eq!(report.matrix.get(i, i), -((i + 1) as f64));
        for j in 0..n {
            if j != i {
                assert_eq!(report.matrix.get(i, j), 0.0);
            }
        }
    }
}

#[test]
fn scenario_3_rank_deficient_all_ones_reports_breakdown() {
    let (m, n, data) = scenarios::all_ones_6x3();
    let matrix = MatrixStore::new(m, n, data);
    let report = Driver::run(matrix, &config(1, 3, 4)).unwrap();
    assert!(
        matches!(report.breakdown, Some((_, _, NumericStatus::ZeroNorm { .. }))),
        "expected a zero-norm breakdown on a rank-1 input, got {:?}",
        report.breakdown
    );
}

#[test]
fn scenario_4_random_8x8_within_tolerance() {
    let (m, n, data) = scenarios::random_8x8();
    let matrix = MatrixStore::new(m, n, data.clone());
    let report = Driver::run(matrix, &config(2, 4, 8)).unwrap();
    assert!(report.breakdown.is_none());
    let residual = gram_residual(&data, &report.matrix.to_vec(), m, n);
    assert!(residual < 1e-6, "residual {residual} too large");
}

#[test]
fn scenario_5_random_100x100_deterministic_across_worker_counts() {
    let (m, n, data) = scenarios::random_100x100();

    let mut results = Vec::new();
    for &threads in &[1usize, 4, 16] {
        let matrix = MatrixStore::new(m, n, data.clone());
        let report = Driver::run(matrix, &config(8, 16, threads)).unwrap();
        assert!(report.breakdown.is_none());
        results.push(report.matrix.to_vec());
    }

    for pair in results.windows(2) {
        assert_eq!(pair[0], pair[1], "factorization differs across worker counts");
    }
}

#[test]
fn scenario_6_trivial_1x1() {
    let (m, n, data) = scenarios::trivial_1x1();
    let matrix = MatrixStore::new(m, n, data);
    let report = Driver::run(matrix, &config(1, 1, 1)).unwrap();
    assert!(report.breakdown.is_none());
    assert_eq!(report.matrix.get(0, 0), -5.0);
}
