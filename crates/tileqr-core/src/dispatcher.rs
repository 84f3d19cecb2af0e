//! Worker Pool & Dispatcher (spec §4.7/§5): each worker loops forever,
//! busy-polling the Ready Queue then the Wait Queue, until it observes the
//! final tile complete. No condition variables, no blocking — every queue
//! op is a `try_pop`.

use crate::dependency::DependencyTable;
use crate::kernels::{self, AuxVectors};
use crate::matrix::MatrixStore;
use crate::queues::{ReadyQueue, WaitQueue};
use crate::task_table::TaskTable;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tileqr_common::{NumericStatus, TaskType};

/// First numerical breakdown observed by any worker, if any. Recorded even
/// when `abort_on_breakdown` is off, so callers can always inspect it.
pub type BreakdownCell = OnceCell<(usize, usize, NumericStatus)>;

/// Everything a worker needs, shared across the pool via `Arc`.
pub struct SharedState {
    pub matrix: MatrixStore,
    pub aux: AuxVectors,
    pub table: TaskTable,
    pub deps: DependencyTable,
    pub ready: ReadyQueue,
    pub wait: WaitQueue,
    pub abort: AtomicBool,
    pub breakdown: BreakdownCell,
    pub abort_on_breakdown: bool,
    final_tile: (usize, usize),
}

impl SharedState {
    pub fn new(matrix: MatrixStore, table: TaskTable, use_priority: bool, abort_on_breakdown: bool) -> Self {
        let aux = AuxVectors::new(matrix.rows());
        let deps = DependencyTable::new(table.rows, table.cols);
        let ready = ReadyQueue::new(use_priority);
        let wait = WaitQueue::new();
        let final_tile = table.final_tile();
        Self {
            matrix,
            aux,
            table,
            deps,
            ready,
            wait,
            abort: AtomicBool::new(false),
            breakdown: OnceCell::new(),
            abort_on_breakdown,
            final_tile,
        }
    }

    fn is_done(&self) -> bool {
        self.deps.get(self.final_tile.0, self.final_tile.1)
    }

    fn record_breakdown(&self, i: usize, j: usize, status: NumericStatus) {
        // Only the first breakdown is kept; later ones are still reported
        // via their task's dependency completion per spec §7 kind 2.
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        let first = self.breakdown.set((i, j, status)).is_ok();
        #[cfg(feature = "tracing")]
        if first {
            tracing::warn!(task_i = i, task_j = j, ?status, "numerical breakdown");
        }
        if self.abort_on_breakdown {
            self.abort.store(true, Ordering::Relaxed);
        }
    }
}

/// Run one worker's dispatch loop (spec §4.7) until the final tile
/// completes or the cooperative abort flag is set.
pub fn run_worker(state: &Arc<SharedState>) {
    let mut idle_spins: u32 = 0;

    loop {
        if state.abort.load(Ordering::Relaxed) {
            return;
        }

        let mut did_work = false;

        if let Some(task) = state.ready.try_pop() {
            did_work = true;
            dispatch_ready(state, task);
        }

        // Wait step: regardless of whether the ready step found work,
        // opportunistically try to promote one waiting task (spec §4.7.2).
        if let Some(task) = state.wait.try_pop() {
            did_work = true;
            let i = task.chunk_idx_i;
            let j = task.chunk_idx_j;
            if state.deps.get(i, j - 1) {
                state.ready.push(task);
            } else {
                state.wait.push(task);
            }
        }

        if state.is_done() {
            return;
        }

        if did_work {
            idle_spins = 0;
        } else {
            // Design note (spec §9): busy-polling is intentional for
            // minimum-latency wakeup, but an empty pass through both
            // queues this close to idle is cheap to back off from a
            // little, bounding CPU burn when there are far more workers
            // than outstanding tasks.
            idle_spins = idle_spins.saturating_add(1);
            if idle_spins > 64 {
                std::thread::sleep(Duration::from_micros(50));
            } else {
                std::hint::spin_loop();
            }
        }
    }
}

fn dispatch_ready(state: &Arc<SharedState>, task: tileqr_common::Task) {
    let i = task.chunk_idx_i;
    let j = task.chunk_idx_j;

    match task.task_type {
        TaskType::Panel => {
            let status = kernels::panel_factor(
                &state.matrix,
                &state.aux,
                task.row_start,
                task.row_end,
                task.col_start,
                task.col_end,
            );
            if status.is_breakdown() {
                state.record_breakdown(i, j, status);
            }
            state.deps.set(i, j);

            // Successors: every (k, j) below this panel's own column,
            // k in [i+1, R) (spec §4.7.1).
            for k in (i + 1)..state.table.rows {
                if let Some(successor) = state.table.get(k, j) {
                    let successor = successor.clone();
                    if j == 0 || state.deps.get(k, j - 1) {
                        state.ready.push(successor);
                    } else {
                        state.wait.push(successor);
                    }
                }
            }
        }
        TaskType::Update => {
            kernels::trailing_update(
                &state.matrix,
                &state.aux,
                task.row_start,
                task.row_end,
                task.col_start,
                task.col_end,
            );
            state.deps.set(i, j);

            if task.enq_nxt_t1 {
                // Corrected coordinate rule (SPEC_FULL.md §9.2): the task
                // just completed sits at the exact column the next
                // diagonal needs its predecessor to occupy, so the next
                // diagonal is `(j / K, j)`, not `((j+1)/K, j+1)`.
                let next_i = j / state.table.k;
                if let Some(next) = state.table.get(next_i, j) {
                    state.ready.push(next.clone());
                }
            }
        }
    }
}
