//! Task sources: where the pool dequeues pending work from.

use thiserror::Error;

use super::Task;

#[derive(Debug, Error)]
pub enum PoolError {
    /// `take()` was called with nothing pending. Dequeuing is the pool
    /// driver's exclusive job, so hitting this means a scheduler bug.
    #[error("task source drained: take() called with no pending tasks")]
    SourceDrained,
}

/// Supplies pending tasks to a [`WorkerPool`](super::WorkerPool).
///
/// `take` borrows the source mutably, so only one dequeue can be in progress
/// at a time and no two workers can ever receive the same task.
pub trait TaskSource<R> {
    fn has_more(&self) -> bool;

    /// Remove and return the next pending task. Only valid after `has_more`
    /// returned true.
    fn take(&mut self) -> Result<Task<R>, PoolError>;
}

/// Pre-populated queue drained last-in-first-out. Shrinks monotonically and
/// is created fresh for each run; there is no fairness guarantee beyond the
/// stack discipline.
pub struct TaskQueue<R> {
    pending: Vec<Task<R>>,
}

impl<R> TaskQueue<R> {
    pub fn new(pending: Vec<Task<R>>) -> Self {
        Self { pending }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<R> TaskSource<R> for TaskQueue<R> {
    fn has_more(&self) -> bool {
        !self.pending.is_empty()
    }

    fn take(&mut self) -> Result<Task<R>, PoolError> {
        self.pending.pop().ok_or(PoolError::SourceDrained)
    }
}
