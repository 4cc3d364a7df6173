//! Per-node reports and the whole-run aggregate.

use std::time::Duration;

/// Outcome of one node apply that did real work.
#[derive(Debug, Clone)]
pub struct NodeReport {
    pub node_name: String,
    /// Items already in the desired state.
    pub correct: usize,
    /// Items that were brought into the desired state.
    pub fixed: usize,
    /// Items skipped (e.g. autoskip selection).
    pub skipped: usize,
    /// Items that could not be fixed.
    pub failed: usize,
    /// (elapsed, item id) per item, in the order items finished.
    pub profiling_info: Vec<(Duration, String)>,
    /// Wall time of this node's apply.
    pub duration: Duration,
}

impl NodeReport {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            correct: 0,
            fixed: 0,
            skipped: 0,
            failed: 0,
            profiling_info: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Number of items this report covers.
    pub fn item_count(&self) -> usize {
        self.profiling_info.len()
    }
}

/// Everything one run produced: reports and formatted error messages in
/// arrival order, plus the measured wall-clock duration of the whole run
/// (not the sum of per-node durations).
#[derive(Debug, Default)]
pub struct ApplyRun {
    pub results: Vec<NodeReport>,
    pub errors: Vec<String>,
    pub duration: Duration,
}

impl ApplyRun {
    /// Process exit status: 0 only when no task failed.
    pub fn exit_code(&self) -> i32 {
        if self.errors.is_empty() {
            0
        } else {
            1
        }
    }
}
