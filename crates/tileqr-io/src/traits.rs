//! The trait seam (spec §4.11): `tileqr-core` only depends on these two
//! traits, never on a concrete backend, so a second matrix format can be
//! added later without touching the scheduler.

use crate::error::IoError;

/// Something that can hand the Driver a dense, row-major `m x n` buffer.
pub trait MatrixSource {
    fn load(&self) -> Result<(usize, usize, Vec<f64>), IoError>;
}

/// Something that can persist a dense, row-major `m x n` buffer.
pub trait MatrixSink {
    fn save(&self, m: usize, n: usize, data: &[f64]) -> Result<(), IoError>;
}
