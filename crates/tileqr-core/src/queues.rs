//! Ready Queue and Wait Queue (spec §4.5/§4.6).
//!
//! The Ready Queue has two modes, selected by `TileConfig::use_priority_main_queue`:
//! a `Mutex`-guarded binary heap when priority ordering is wanted (ordering
//! is "best-effort" per spec §4.5 — a single lock around push/pop is
//! adequate since the kernels, not queue contention, dominate runtime), or
//! a lock-free MPMC channel when it isn't. The Wait Queue is always a FIFO
//! channel: tasks only sit there briefly between a failed readiness check
//! and the next worker's promotion attempt.

use crossbeam_channel::{Receiver, Sender};
use std::sync::Mutex;
use tileqr_common::Task;

enum ReadyInner {
    Priority(Mutex<std::collections::BinaryHeap<Task>>),
    Fifo {
        tx: Sender<Task>,
        rx: Receiver<Task>,
    },
}

pub struct ReadyQueue {
    inner: ReadyInner,
}

impl ReadyQueue {
    pub fn new(use_priority: bool) -> Self {
        let inner = if use_priority {
            ReadyInner::Priority(Mutex::new(std::collections::BinaryHeap::new()))
        } else {
            let (tx, rx) = crossbeam_channel::unbounded();
            ReadyInner::Fifo { tx, rx }
        };
        Self { inner }
    }

    pub fn push(&self, task: Task) {
        match &self.inner {
            ReadyInner::Priority(heap) => {
                heap.lock().expect("ready queue mutex poisoned").push(task);
            }
            ReadyInner::Fifo { tx, .. } => {
                tx.send(task).expect("ready queue channel disconnected");
            }
        }
    }

    pub fn try_pop(&self) -> Option<Task> {
        match &self.inner {
            ReadyInner::Priority(heap) => heap.lock().expect("ready queue mutex poisoned").pop(),
            ReadyInner::Fifo { rx, .. } => rx.try_recv().ok(),
        }
    }
}

/// A concurrent FIFO of tasks whose predecessors were not yet satisfied at
/// enqueue time.
pub struct WaitQueue {
    tx: Sender<Task>,
    rx: Receiver<Task>,
}

impl Default for WaitQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl WaitQueue {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub fn push(&self, task: Task) {
        self.tx.send(task).expect("wait queue channel disconnected");
    }

    pub fn try_pop(&self) -> Option<Task> {
        self.rx.try_recv().ok()
    }
}
