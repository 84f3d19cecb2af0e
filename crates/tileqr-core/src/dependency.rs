//! Dependency Table (spec §4.4): a 2D array of atomic booleans tracking
//! task completion. No CAS loop — each cell is written exactly once, by the
//! worker that just completed that task.

use std::sync::atomic::{AtomicBool, Ordering};

pub struct DependencyTable {
    rows: usize,
    cols: usize,
    cells: Vec<AtomicBool>,
}

impl DependencyTable {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        cells.resize_with(rows * cols, || AtomicBool::new(false));
        Self { rows, cols, cells }
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols, "dependency index out of range");
        i * self.cols + j
    }

    /// Mark `(i, j)` complete. Release semantics: every matrix/aux-vector
    /// write the completing worker made while executing `(i, j)` happens
    /// before this store, so a later `get` that observes `true` also
    /// observes those writes.
    ///
    /// Panics (protocol error, spec §7 kind 3) if `(i, j)` was already set —
    /// each task executes at most once.
    pub fn set(&self, i: usize, j: usize) {
        let idx = self.index(i, j);
        let was_set = self.cells[idx].swap(true, Ordering::Release);
        assert!(!was_set, "task ({i}, {j}) completed twice — scheduler protocol violation");
    }

    /// Acquire load: pairs with the `Release` store in `set` so that
    /// observing `true` here makes all of that worker's writes visible.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.cells[self.index(i, j)].load(Ordering::Acquire)
    }
}
