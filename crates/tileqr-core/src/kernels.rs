//! Householder Kernels (spec §4.2): two pure numeric procedures over index
//! ranges into the `MatrixStore`, communicating scalars through the shared
//! auxiliary vectors `up`/`b`.
//!
//! Both kernels are side-effect-free other than writes to `M` and (for
//! `panel_factor`) to `aux`. Neither synchronizes anything; correctness
//! requires callers (the dispatcher) to respect the dependency
//! preconditions in spec §3/§5. They take only numeric arrays and index
//! ranges so they can be unit-tested with no scheduler present at all.

use crate::matrix::MatrixStore;
use std::cell::UnsafeCell;
use tileqr_common::NumericStatus;

/// The shared `up`/`b` auxiliary vectors, one entry per matrix row.
///
/// Single-writer/many-reader: entry `p` is written exactly once, by the
/// `panel_factor` task whose pivot sweep covers row `p`, and read only by
/// `trailing_update` tasks of that same panel row after they observe that
/// task's Dependency Table bit set (release/acquire handles the visibility;
/// see `dependency`).
pub struct AuxVectors {
    up: UnsafeCell<Vec<f64>>,
    b: UnsafeCell<Vec<f64>>,
}

// SAFETY: see the single-writer/many-reader contract on the struct doc and
// on `dependency::DependencyTable` — callers gate reads on the producing
// task's dependency bit.
unsafe impl Sync for AuxVectors {}

impl AuxVectors {
    pub fn new(m: usize) -> Self {
        Self {
            up: UnsafeCell::new(vec![0.0; m]),
            b: UnsafeCell::new(vec![0.0; m]),
        }
    }

    #[inline]
    fn set(&self, p: usize, up: f64, b: f64) {
        // SAFETY: only called once per `p`, by the single panel task that
        // owns pivot row `p`.
        unsafe {
            (*self.up.get())[p] = up;
            (*self.b.get())[p] = b;
        }
    }

    #[inline]
    fn get(&self, p: usize) -> (f64, f64) {
        // SAFETY: only called after the caller observed the producing
        // task's dependency bit set.
        unsafe { ((*self.up.get())[p], (*self.b.get())[p]) }
    }
}

/// `panel_factor` (type-1): factor the diagonal panel `[r0, r1) x [c0, c1)`
/// and populate `aux.up[p]`/`aux.b[p]` for every pivot `p` that did not hit
/// a numerical breakdown.
///
/// Each pivot `p` is a *column*; its reflector is built from the entries
/// below the diagonal in that column, spanning the full row count `m` (the
/// dimension being eliminated), not the column count `c1`. A pivot can
/// never exceed the matrix's own column count, so the sweep also stops at
/// `n` regardless of how far `r1` (the panel's row-band end) extends — a
/// panel row-band beyond the last pivot column contributes no pivots at
/// all, it only receives trailing updates from earlier panels.
///
/// `r0_eff = r0`, except the very first panel (`r0 == 1`... actually `r0 ==
/// 0` is already the natural start; the quirk preserved from the source is
/// that when the caller passes `r0 == 1` the sweep still starts at row 0).
/// Returns the status of the *last* pivot processed (breakdown stops the
/// sweep early, per spec §4.2/§7).
pub fn panel_factor(
    m_store: &MatrixStore,
    aux: &AuxVectors,
    r0: usize,
    r1: usize,
    _c0: usize,
    c1: usize,
) -> NumericStatus {
    let m = m_store.rows();
    let n = m_store.cols();
    let r0_eff = if r0 == 1 { 0 } else { r0 };
    let last_pivot = r1.min(n);

    for p in r0_eff..last_pivot {
        // Step 1: column-norm surrogate, scanned down column `p` across the
        // rows it eliminates.
        let mut cl = m_store.get(p, p).abs();
        for i in (p + 1)..m {
            cl = cl.max(m_store.get(i, p).abs());
        }
        if cl == 0.0 {
            return NumericStatus::ZeroNorm { pivot: p };
        }

        // Step 2.
        let mut sm = (m_store.get(p, p) / cl).powi(2);
        for i in (p + 1)..m {
            sm += (m_store.get(i, p) / cl).powi(2);
        }
        cl *= sm.sqrt();
        if m_store.get(p, p) > 0.0 {
            cl = -cl;
        }

        // Step 3.
        let up = m_store.get(p, p) - cl;
        m_store.set(p, p, cl);
        let mut b = up * cl;
        if b >= 0.0 {
            return NumericStatus::NonNegativeBeta { pivot: p };
        }

        // Step 4.
        b = 1.0 / b;
        aux.set(p, up, b);

        // Step 5: apply this pivot's reflector to every trailing column in
        // the task's own column range, so later pivots in this same panel
        // observe the updated data.
        for j in (p + 1)..c1 {
            let mut sm = m_store.get(p, j) * up;
            for i in (p + 1)..m {
                sm += m_store.get(i, j) * m_store.get(i, p);
            }
            if sm == 0.0 {
                continue;
            }
            sm *= b;
            m_store.set(p, j, m_store.get(p, j) + sm * up);
            for i in (p + 1)..m {
                m_store.set(i, j, m_store.get(i, j) + sm * m_store.get(i, p));
            }
        }
    }

    NumericStatus::Ok
}

/// `trailing_update` (type-2): apply the reflectors of pivots `[r0, r1)`
/// (already factored by the paired `panel_factor`) to columns `[c0, c1)`.
/// Same transposed-column convention as `panel_factor`'s step 5: the
/// elimination direction spans the full row count `m`, not `c1`. `r1` is
/// clamped to the matrix's column count, since pivots beyond it were never
/// computed (the paired panel task's own sweep stops there too).
pub fn trailing_update(
    m_store: &MatrixStore,
    aux: &AuxVectors,
    r0: usize,
    r1: usize,
    c0: usize,
    c1: usize,
) {
    let m = m_store.rows();
    let n = m_store.cols();
    let c0_eff = if c0 == 1 { 0 } else { c0 };
    let last_pivot = r1.min(n);

    for p in r0..last_pivot {
        let (up, b) = aux.get(p);
        for j in c0_eff..c1 {
            let mut sm = m_store.get(p, j) * up;
            for i in (p + 1)..m {
                sm += m_store.get(i, j) * m_store.get(i, p);
            }
            if sm == 0.0 {
                continue;
            }
            sm *= b;
            m_store.set(p, j, m_store.get(p, j) + sm * up);
            for i in (p + 1)..m {
                m_store.set(i, j, m_store.get(i, j) + sm * m_store.get(i, p));
            }
        }
    }
}
