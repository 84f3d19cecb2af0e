//! Parallel, dynamic, tile-based Householder QR scheduler.
//!
//! Leaves-first, matching the component order of the design: the Matrix
//! Store and kernels are pure numeric code with no knowledge of threads;
//! the task table and dependency table are immutable/append-once data the
//! scheduler indexes into; the queues and dispatcher are where the actual
//! concurrency lives; the driver ties it all together.

pub mod dependency;
pub mod dispatcher;
pub mod driver;
pub mod kernels;
pub mod matrix;
pub mod queues;
pub mod task_table;

pub use dependency::DependencyTable;
pub use driver::{Driver, RunReport};
pub use matrix::MatrixStore;
pub use task_table::TaskTable;

pub use tileqr_common::{ConfigError, Error, NumericStatus, Task, TaskType, TileConfig};
