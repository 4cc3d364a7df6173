//! The apply-all-targets orchestrator.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use crate::hooks::HookRegistry;
use crate::pool::{Task, TaskOutcome, TaskQueue, WorkerPool};

use super::{ApplyOptions, ApplyRun, NodeReport};

/// One configuration target. `apply` runs the node's convergence once and
/// reports what it did, or `Skip` when there was nothing to do.
pub trait Node: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn apply(
        &self,
        opts: &ApplyOptions,
    ) -> impl Future<Output = Result<TaskOutcome<NodeReport>>> + Send;
}

/// Apply every node once with up to `workers` nodes in flight.
///
/// Failures are contained per node: the failing node's trace is printed
/// immediately, a formatted `"{node}: {message}"` record is appended to the
/// error list, and the run continues. Reports and errors land in arrival
/// order because the pool serializes the two callbacks.
pub async fn apply_nodes<N: Node>(
    nodes: &[Arc<N>],
    opts: &ApplyOptions,
    workers: usize,
    hooks: &HookRegistry,
) -> Result<ApplyRun> {
    let names: Vec<String> = nodes.iter().map(|n| n.name().to_string()).collect();
    hooks.apply_start(&names, opts);

    let started = Instant::now();
    let tasks = nodes
        .iter()
        .map(|node| {
            let id = node.name().to_string();
            let node = Arc::clone(node);
            let opts = opts.clone();
            Task::new(id, async move { node.apply(&opts).await })
        })
        .collect();
    let mut queue = TaskQueue::new(tasks);

    let mut results: Vec<NodeReport> = Vec::new();
    let mut errors: Vec<String> = Vec::new();
    let profiling = opts.profiling;

    WorkerPool::new(workers, "apply")
        .run(
            &mut queue,
            |task_id, report: NodeReport, _elapsed| {
                if profiling {
                    print_profiling(task_id, &report);
                }
                results.push(report);
            },
            |err| {
                let msg = format!("{}: {}", err.task_id, err.message);
                eprintln!("{}", err.trace);
                eprintln!("{}", msg);
                errors.push(msg);
            },
        )
        .await?;

    let duration = started.elapsed();
    hooks.apply_end(&names, duration);

    Ok(ApplyRun {
        results,
        errors,
        duration,
    })
}

/// Per-item timing block for one node, in the order the report supplies the
/// items, followed by the summed total.
fn print_profiling(task_id: &str, report: &NodeReport) {
    let name = console::style(task_id).bold();
    println!("  {} per-item timing", name);
    println!("  {}    seconds   item", name);
    let mut total = 0.0;
    for (elapsed, item_id) in &report.profiling_info {
        println!("  {} {:10.3}   {}", name, elapsed.as_secs_f64(), item_id);
        total += elapsed.as_secs_f64();
    }
    println!("  {} {:10.3}   (total)", name, total);
}
