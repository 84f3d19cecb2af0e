//! Task Table (spec §4.3): the immutable 2D catalog of task descriptors,
//! built once from matrix dimensions and tile parameters.
//!
//! Column tiling (spec §9 open question, resolved in SPEC_FULL.md §9.1):
//! a type-1 task at diagonal `(i, K·i)` owns the *entire* BETA-wide column
//! block it panel-factors, `[K·i·ALPHA, min(K·i·ALPHA + BETA, n))` — not
//! just its own ALPHA-wide tile. Each pivot inside `panel_factor` applies
//! its reflector to every later column in that block (kernels.rs step 5),
//! so by the time the panel task finishes, every pivot has already seen
//! every earlier pivot's update — a later pivot's column norm would
//! otherwise be computed from stale data. A type-2 task at `(i, j)` gets
//! `[j·ALPHA, min((j+1)·ALPHA, n))` and only exists for `j ≥ K·(i+1)`,
//! i.e. tiles *outside* the panel's own block (the tiles inside it never
//! get a separate task — the panel task already wrote them, and giving
//! them a second task would double-apply their reflector and violate the
//! disjoint-write invariant in spec §5). This collapses to the literal
//! `j > K·i` reading of spec §3 exactly when `K == 1` (ALPHA == BETA).

use tileqr_common::{Task, TaskType, TileConfig};

pub struct TaskTable {
    /// Panel rows, `R = ceil(m / BETA)`.
    pub rows: usize,
    /// Column tiles, `C = ceil(m / ALPHA)` — note: derived from `m`, not
    /// `n`, per spec §3 ("because QR advances along the diagonal").
    pub cols: usize,
    /// `K = BETA / ALPHA`.
    pub k: usize,
    grid: Vec<Option<Task>>,
}

fn ceil_div(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

impl TaskTable {
    pub fn build(m: usize, n: usize, config: &TileConfig) -> Self {
        let alpha = config.alpha as usize;
        let beta = config.beta as usize;
        let k = config.k() as usize;

        let rows = ceil_div(m, beta).max(1);
        let cols = ceil_div(m, alpha).max(1);

        let mut grid: Vec<Option<Task>> = vec![None; rows * cols];
        let mut flagged_rows: Vec<bool> = vec![false; rows];

        for i in 0..rows {
            let j0 = k * i;
            if j0 >= cols {
                // Past the last meaningful diagonal (can happen on the
                // final, short panel); nothing more to schedule.
                break;
            }

            let row_start = i * beta;
            let row_end = ((i + 1) * beta).min(m);

            let panel_col_start = (j0 * alpha).min(n);
            let panel_col_end = (panel_col_start + beta).min(n);
            let priority1 = Self::priority(i, cols, 1, j0);

            grid[i * cols + j0] = Some(Task {
                chunk_idx_i: i,
                chunk_idx_j: j0,
                task_type: TaskType::Panel,
                row_start,
                row_end,
                col_start: panel_col_start,
                col_end: panel_col_end,
                priority: priority1,
                enq_nxt_t1: false,
            });

            // The column whose completion satisfies invariant 4 for the
            // next diagonal: `(i+1, K(i+1))` needs `(i, K(i+1))` complete.
            // (spec §9's own suggestion, `K(i+1)-1`, collapses onto `j0`
            // when `K == 1` and never gets flagged — see SPEC_FULL.md §9.)
            // It is also, not coincidentally, the first column tile outside
            // this panel's own BETA-wide block — see the module doc above.
            let flag_j = k * (i + 1);
            let has_next_panel = i + 1 < rows && flag_j < cols;

            for j in flag_j..cols {
                let col_start = (j * alpha).min(n);
                let col_end = ((j + 1) * alpha).min(n);
                let priority2 = Self::priority(i, cols, 2, j);
                let enq_nxt_t1 = has_next_panel && j == flag_j;
                if enq_nxt_t1 {
                    flagged_rows[i] = true;
                }

                grid[i * cols + j] = Some(Task {
                    chunk_idx_i: i,
                    chunk_idx_j: j,
                    task_type: TaskType::Update,
                    row_start,
                    row_end,
                    col_start,
                    col_end,
                    priority: priority2,
                    enq_nxt_t1,
                });
            }

            assert!(
                !has_next_panel || flagged_rows[i],
                "panel row {i} has a successor diagonal but no task carries enq_nxt_t1"
            );
        }

        Self { rows, cols, k, grid }
    }

    fn priority(i: usize, cols: usize, task_type: u64, j: usize) -> u64 {
        // priority = i*(C+1)*2 + (type==1?0:1)*(C+1) + j, per spec §4.3.
        let c1 = (cols as u64) + 1;
        (i as u64) * c1 * 2 + (task_type - 1) * c1 + (j as u64)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Task> {
        if i >= self.rows || j >= self.cols {
            return None;
        }
        self.grid[i * self.cols + j].as_ref()
    }

    /// Coordinates of the final tile in the task grid — the diagonal of
    /// the last panel row — whose completion signals termination (spec
    /// §4.7 step 3).
    pub fn final_tile(&self) -> (usize, usize) {
        let i = self.rows - 1;
        (i, self.k * i)
    }
}
