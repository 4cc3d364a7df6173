//! Bounded-concurrency task pool.
//!
//! Executes independent tasks pulled from a shrinking queue, keeping up to a
//! fixed number of bodies in flight. Per-task failures are isolated (one
//! broken target never aborts the run) and every completion is routed to
//! exactly one of two reporting callbacks, which are serialized relative to
//! each other so callers can mutate shared state inside them.

mod run;
mod source;
mod task;


pub use run::WorkerPool;
pub use source::{PoolError, TaskQueue, TaskSource};
pub use task::{Task, TaskBody, TaskError, TaskOutcome};
