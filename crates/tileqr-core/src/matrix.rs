//! The Matrix Store (spec §4.1): owns the mutable dense matrix in
//! row-major layout. No synchronization of its own — correctness relies
//! entirely on the scheduler partitioning accesses so no two workers ever
//! touch the same element concurrently for a write (see `dependency` and
//! `dispatcher`).

use std::cell::UnsafeCell;

/// A dense, row-major `m x n` matrix of `f64`.
///
/// `get`/`set` are for single-threaded callers (tests, I/O). Concurrent
/// kernel execution goes through [`MatrixStore::row_mut_ptr`], which hands
/// out a raw pointer to the backing buffer: the kernels index into it with
/// `M[r * n + c]` directly, exactly as spec §4.1 prescribes, and rely on the
/// scheduler's dependency discipline (not `MatrixStore`) for safety.
pub struct MatrixStore {
    m: usize,
    n: usize,
    data: UnsafeCell<Vec<f64>>,
}

// SAFETY: `MatrixStore` hands out a raw pointer into `data` and trusts the
// scheduler's dependency protocol to serialize writes to any given element.
// This is the documented contract of spec §4.1/§5, not a general-purpose
// promise — callers outside `dispatcher`/`kernels` should use `get`/`set`.
unsafe impl Sync for MatrixStore {}

impl MatrixStore {
    pub fn new(m: usize, n: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), m * n, "matrix data length must equal m * n");
        Self {
            m,
            n,
            data: UnsafeCell::new(data),
        }
    }

    pub fn zeros(m: usize, n: usize) -> Self {
        Self::new(m, n, vec![0.0; m * n])
    }

    pub fn rows(&self) -> usize {
        self.m
    }

    pub fn cols(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        // SAFETY: single-threaded accessor; caller owns the only reference
        // at this point (no kernel is concurrently executing).
        unsafe { (*self.data.get())[r * self.n + c] }
    }

    #[inline]
    pub fn set(&self, r: usize, c: usize, v: f64) {
        // SAFETY: see `get`.
        unsafe {
            (*self.data.get())[r * self.n + c] = v;
        }
    }

    /// Raw base pointer into the row-major buffer, for the kernels. The
    /// dependency protocol, not the type system, guarantees disjoint access.
    #[inline]
    pub fn as_mut_ptr(&self) -> *mut f64 {
        // SAFETY: exposed for `kernels`, which only ever touches the index
        // ranges its caller (the dispatcher) has established are exclusive.
        unsafe { (*self.data.get()).as_mut_ptr() }
    }

    /// Snapshot the buffer (copies). Used by tests and by the "save output"
    /// hook in `tileqr-cli`.
    pub fn to_vec(&self) -> Vec<f64> {
        // SAFETY: caller is responsible for calling this only when no
        // kernel is concurrently writing (e.g. after the Driver has joined
        // all workers).
        unsafe { (*self.data.get()).clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_indexing() {
        let m = MatrixStore::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.get(1, 2), 6.0);
        m.set(1, 1, 42.0);
        assert_eq!(m.get(1, 1), 42.0);
    }

    #[test]
    #[should_panic]
    fn rejects_mismatched_length() {
        let _ = MatrixStore::new(2, 2, vec![1.0, 2.0, 3.0]);
    }
}
