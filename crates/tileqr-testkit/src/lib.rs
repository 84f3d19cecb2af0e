//! Fixtures and comparison helpers shared by `tileqr-core`'s property and
//! integration tests (spec §8). Kept dependency-free of `tileqr-core` itself
//! so `tileqr-core` can depend on this crate as a dev-dependency without a
//! cycle — fixtures are plain `(m, n, Vec<f64>)` tuples, and the comparison
//! helpers only need the input matrix and the factored output's upper
//! triangle, not the Householder reflectors (which are private to the
//! kernels).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `n x n` identity matrix, row-major.
pub fn identity(n: usize) -> (usize, usize, Vec<f64>) {
    let mut data = vec![0.0; n * n];
    for i in 0..n {
        data[i * n + i] = 1.0;
    }
    (n, n, data)
}

/// `m x n` matrix of all ones — rank 1, forces a numerical breakdown past
/// the first pivot.
pub fn all_ones(m: usize, n: usize) -> (usize, usize, Vec<f64>) {
    (m, n, vec![1.0; m * n])
}

/// `n x n` diagonal matrix from `values` (must have length `n`).
pub fn diagonal(values: &[f64]) -> (usize, usize, Vec<f64>) {
    let n = values.len();
    let mut data = vec![0.0; n * n];
    for (i, v) in values.iter().enumerate() {
        data[i * n + i] = *v;
    }
    (n, n, data)
}

/// Deterministic `m x n` random matrix, reproducible from `seed` alone
/// (no wall-clock or OS entropy — required since the scheduler's own tests
/// assert determinism across worker counts).
pub fn seeded_random(m: usize, n: usize, seed: u64) -> (usize, usize, Vec<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data: Vec<f64> = (0..m * n).map(|_| rng.gen_range(-10.0..10.0)).collect();
    (m, n, data)
}

/// Frobenius norm of a flat buffer, `sqrt(sum(x_ij^2))`.
pub fn frobenius_norm(data: &[f64]) -> f64 {
    data.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// `A^T A` as a flat `n x n` row-major buffer, from the `m x n` input `a`.
pub fn gram(a: &[f64], m: usize, n: usize) -> Vec<f64> {
    let mut g = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..m {
                sum += a[k * n + i] * a[k * n + j];
            }
            g[i * n + j] = sum;
        }
    }
    g
}

/// `R^T R` from a factored `m x n` buffer, zeroing everything on or below
/// the diagonal's subdiagonal and every row at or past `n` (those entries
/// hold leftover reflector scratch, not `R`).
pub fn upper_triangular_gram(factored: &[f64], m: usize, n: usize) -> Vec<f64> {
    let rows = m.min(n);
    let mut r = vec![0.0; n * n];
    for i in 0..rows {
        for j in i..n {
            r[i * n + j] = factored[i * n + j];
        }
    }
    gram(&r, n, n)
}

/// `‖A^T A − R^T R‖_F`, the reconstruction-free orthogonality check: since
/// `Q` is orthogonal, `A^T A == R^T R` exactly in infinite precision,
/// independent of ever forming `Q`.
pub fn gram_residual(a: &[f64], factored: &[f64], m: usize, n: usize) -> f64 {
    let lhs = gram(a, m, n);
    let rhs = upper_triangular_gram(factored, m, n);
    let diff: Vec<f64> = lhs.iter().zip(rhs.iter()).map(|(l, r)| l - r).collect();
    frobenius_norm(&diff)
}

/// Scenario fixtures: the six literal end-to-end cases from spec §8.
pub mod scenarios {
    use super::*;

    pub fn identity_4x4() -> (usize, usize, Vec<f64>) {
        identity(4)
    }

    pub fn diagonal_k1() -> (usize, usize, Vec<f64>) {
        diagonal(&[1.0, 2.0, 3.0, 4.0])
    }

    pub fn all_ones_6x3() -> (usize, usize, Vec<f64>) {
        all_ones(6, 3)
    }

    pub fn random_8x8() -> (usize, usize, Vec<f64>) {
        seeded_random(8, 8, 0x5EED_0008)
    }

    pub fn random_100x100() -> (usize, usize, Vec<f64>) {
        seeded_random(100, 100, 0x5EED_0100)
    }

    pub fn trivial_1x1() -> (usize, usize, Vec<f64>) {
        (1, 1, vec![5.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_gram_is_identity() {
        let (m, n, data) = identity(3);
        let g = gram(&data, m, n);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((g[i * 3 + j] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn seeded_random_is_deterministic() {
        let (_, _, a) = seeded_random(5, 5, 42);
        let (_, _, b) = seeded_random(5, 5, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let (_, _, a) = seeded_random(5, 5, 1);
        let (_, _, b) = seeded_random(5, 5, 2);
        assert_ne!(a, b);
    }
}
