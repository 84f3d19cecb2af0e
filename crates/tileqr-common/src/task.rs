//! The task-grid vocabulary: coordinates, row/column ranges, and priority.
//!
//! Built once per run by the task table initializer and never mutated
//! afterwards; see `tileqr_core::task_table`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which kernel a task invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TaskType {
    /// Diagonal panel factorization (`panel_factor`).
    Panel,
    /// Trailing-submatrix update (`trailing_update`).
    Update,
}

/// Per-task numerical outcome, surfaced instead of silently losing the
/// breakdown branches inside `panel_factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericStatus {
    Ok,
    /// Pivot column norm collapsed to zero (rank deficiency).
    ZeroNorm { pivot: usize },
    /// `up * cl >= 0`: the reflector failed to separate the pivot.
    NonNegativeBeta { pivot: usize },
}

impl NumericStatus {
    pub fn is_breakdown(&self) -> bool {
        !matches!(self, NumericStatus::Ok)
    }
}

/// One cell of the task grid, `(chunk_idx_i, chunk_idx_j)`.
///
/// `row_start..row_end` and `col_start..col_end` are half-open ranges into
/// the matrix. `priority` orders the Ready Queue (lower sorts first);
/// `enq_nxt_t1` is set on exactly one `Update` task per panel row — the one
/// whose completion seeds the next `Panel` task (see
/// `tileqr_core::task_table`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Task {
    pub chunk_idx_i: usize,
    pub chunk_idx_j: usize,
    pub task_type: TaskType,
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
    pub priority: u64,
    pub enq_nxt_t1: bool,
}

impl Task {
    pub fn is_diagonal(&self, k: usize) -> bool {
        matches!(self.task_type, TaskType::Panel) && self.chunk_idx_j == k * self.chunk_idx_i
    }
}

// Ordering for the priority Ready Queue: lower `priority` value pops first,
// which is the opposite of `BinaryHeap`'s default max-heap, so callers wrap
// tasks in `Reverse` (or compare via this impl, which already does it).
impl Eq for Task {}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Task {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so a std::collections::BinaryHeap (max-heap) pops the
        // task with the *smallest* priority value first.
        other.priority.cmp(&self.priority)
    }
}
