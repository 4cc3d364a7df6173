//! Pool driver: fills worker slots from the source and routes completions.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::task::JoinSet;

use super::{TaskError, TaskOutcome, TaskSource};

/// Fixed-size set of execution slots plus the scheduling loop.
pub struct WorkerPool {
    workers: usize,
    pool_id: String,
}

impl WorkerPool {
    /// `workers` is clamped to at least 1. `pool_id` is diagnostic only.
    pub fn new(workers: usize, pool_id: impl Into<String>) -> Self {
        Self {
            workers: workers.max(1),
            pool_id: pool_id.into(),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every task the source yields, keeping up to `workers` bodies in
    /// flight; when one finishes, the next pending task is started until the
    /// source is drained.
    ///
    /// Each completion is routed to exactly one callback: `on_result` for
    /// `Done` outcomes (with the task's elapsed wall time), `on_error` for
    /// task-body errors and panics. `Skip` outcomes invoke neither. Both
    /// callbacks run on this driver task, one at a time, so callers may
    /// append to shared collections inside them without extra locking.
    ///
    /// Blocks until the source is empty and no task is in flight. A task
    /// failure never stops the run; only a source error (a scheduler bug)
    /// aborts it. There is no pool-level timeout: a hung body keeps the pool
    /// from draining, which is the body's responsibility to avoid.
    pub async fn run<R, S>(
        &self,
        source: &mut S,
        mut on_result: impl FnMut(&str, R, Duration),
        mut on_error: impl FnMut(TaskError),
    ) -> Result<()>
    where
        R: Send + 'static,
        S: TaskSource<R>,
    {
        let mut join_set: JoinSet<(String, Instant, Result<TaskOutcome<R>>)> = JoinSet::new();
        // Task ids keyed by tokio task id, so a panicked body can still be
        // reported against the right target.
        let mut in_flight: HashMap<tokio::task::Id, String> = HashMap::new();

        loop {
            while join_set.len() < self.workers && source.has_more() {
                let task = source.take()?;
                let task_id = task.id;
                let body = task.body;
                let id = task_id.clone();
                let started = Instant::now();
                let handle = join_set.spawn(async move { (id, started, body.await) });
                in_flight.insert(handle.id(), task_id);
            }

            if join_set.is_empty() {
                break;
            }

            let Some(joined) = join_set.join_next_with_id().await else {
                break;
            };
            match joined {
                Ok((tokio_id, (task_id, started, outcome))) => {
                    in_flight.remove(&tokio_id);
                    let elapsed = started.elapsed();
                    match outcome {
                        Ok(TaskOutcome::Skip) => {
                            tracing::debug!(pool = %self.pool_id, task = %task_id, "skipped");
                        }
                        Ok(TaskOutcome::Done(report)) => on_result(&task_id, report, elapsed),
                        Err(err) => {
                            tracing::debug!(
                                pool = %self.pool_id,
                                task = %task_id,
                                "task failed: {:#}",
                                err
                            );
                            on_error(TaskError::from_anyhow(&task_id, &err));
                        }
                    }
                }
                Err(join_err) => {
                    let task_id = in_flight
                        .remove(&join_err.id())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    tracing::warn!(pool = %self.pool_id, task = %task_id, "task body panicked");
                    on_error(TaskError {
                        task_id,
                        message: format!("task body panicked: {}", join_err),
                        trace: join_err.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
