//! Task, outcome, and failure-record types for the worker pool.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use anyhow::Result;

/// Boxed task body: polled to completion exactly once, yields an outcome or
/// an error.
pub type TaskBody<R> = Pin<Box<dyn Future<Output = Result<TaskOutcome<R>>> + Send + 'static>>;

/// What a task body produced.
#[derive(Debug)]
pub enum TaskOutcome<R> {
    /// The target had nothing to do. Never reaches a reporting callback.
    Skip,
    /// The target was processed; `R` is the per-task report.
    Done(R),
}

/// One unit of work: a target bound to its body, consumed exactly once.
pub struct Task<R> {
    pub id: String,
    pub body: TaskBody<R>,
}

impl<R> Task<R> {
    pub fn new(
        id: impl Into<String>,
        body: impl Future<Output = Result<TaskOutcome<R>>> + Send + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            body: Box::pin(body),
        }
    }
}

/// Structured failure record for one task. The pool converts task-body
/// errors (and panics) into this at the callback boundary; nothing unwinds
/// into the scheduling loop.
#[derive(Debug, Clone)]
pub struct TaskError {
    pub task_id: String,
    /// Rendered error chain, outermost cause first.
    pub message: String,
    /// Full diagnostic rendering (error chain plus backtrace when captured).
    pub trace: String,
}

impl TaskError {
    pub(crate) fn from_anyhow(task_id: &str, err: &anyhow::Error) -> Self {
        Self {
            task_id: task_id.to_string(),
            message: format!("{:#}", err),
            trace: format!("{:?}", err),
        }
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.task_id, self.message)
    }
}
