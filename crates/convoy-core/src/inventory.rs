//! TOML node inventory and the command-backed [`Node`] implementation.
//!
//! Each node declares items; an item is converged by an optional `test`
//! command (exit 0 means already correct) and an `apply` command. Items are
//! independent and run through their own bounded pool, so one node's items
//! overlap up to `item_workers`.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use tokio::process::Command;

use crate::apply::{ApplyOptions, Node, NodeReport};
use crate::pool::{Task, TaskError, TaskOutcome, TaskQueue, WorkerPool};

/// One declared item: a unit of configuration on a node.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSpec {
    pub id: String,
    /// Optional check; exit 0 means the item is already correct.
    #[serde(default)]
    pub test: Option<String>,
    /// Command that brings the item into the desired state.
    pub apply: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default, rename = "item")]
    pub items: Vec<ItemSpec>,
}

/// Whole inventory file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inventory {
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeSpec>,
}

impl Inventory {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading inventory {}", path.display()))?;
        let inventory: Inventory = toml::from_str(&data)
            .with_context(|| format!("parsing inventory {}", path.display()))?;
        Ok(inventory)
    }

    /// Resolve target names to nodes. An empty target list selects every
    /// node; an unknown name is an error.
    pub fn select(&self, targets: &[String]) -> Result<Vec<Arc<CommandNode>>> {
        if targets.is_empty() {
            return Ok(self
                .nodes
                .iter()
                .map(|spec| Arc::new(CommandNode::new(spec.clone())))
                .collect());
        }
        let mut selected = Vec::with_capacity(targets.len());
        for target in targets {
            let spec = self
                .nodes
                .iter()
                .find(|n| &n.name == target)
                .ok_or_else(|| anyhow!("unknown node: {}", target))?;
            selected.push(Arc::new(CommandNode::new(spec.clone())));
        }
        Ok(selected)
    }
}

/// What happened to one item.
#[derive(Debug, Clone, Copy)]
enum ItemStatus {
    Correct,
    Fixed,
    Failed,
    Skipped,
}

/// Node whose items are converged by shell commands.
pub struct CommandNode {
    spec: NodeSpec,
}

impl CommandNode {
    pub fn new(spec: NodeSpec) -> Self {
        Self { spec }
    }
}

impl Node for CommandNode {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn apply(
        &self,
        opts: &ApplyOptions,
    ) -> impl Future<Output = Result<TaskOutcome<NodeReport>>> + Send {
        async move {
            if self.spec.items.is_empty() {
                tracing::debug!(node = %self.spec.name, "no items, skipping");
                return Ok(TaskOutcome::Skip);
            }

            let started = Instant::now();
            let tasks = self
                .spec
                .items
                .iter()
                .map(|item| {
                    let item = item.clone();
                    let autoskip = opts.autoskip.clone();
                    let force = opts.force;
                    Task::new(item.id.clone(), async move {
                        run_item(&item, &autoskip, force).await.map(TaskOutcome::Done)
                    })
                })
                .collect();
            let mut queue = TaskQueue::new(tasks);

            let mut report = NodeReport::new(&self.spec.name);
            let mut item_errors: Vec<TaskError> = Vec::new();

            WorkerPool::new(opts.item_workers, format!("items:{}", self.spec.name))
                .run(
                    &mut queue,
                    |item_id, status: ItemStatus, elapsed: Duration| {
                        match status {
                            ItemStatus::Correct => report.correct += 1,
                            ItemStatus::Fixed => report.fixed += 1,
                            ItemStatus::Failed => report.failed += 1,
                            ItemStatus::Skipped => report.skipped += 1,
                        }
                        report.profiling_info.push((elapsed, item_id.to_string()));
                    },
                    |err| item_errors.push(err),
                )
                .await?;

            if let Some(first) = item_errors.first() {
                bail!(
                    "{} item(s) errored, first: {}: {}",
                    item_errors.len(),
                    first.task_id,
                    first.message
                );
            }

            report.duration = started.elapsed();
            Ok(TaskOutcome::Done(report))
        }
    }
}

/// Converge one item. Autoskip wins over everything; a passing test makes
/// the item correct unless `force` re-applies it.
async fn run_item(item: &ItemSpec, autoskip: &[String], force: bool) -> Result<ItemStatus> {
    if autoskip.iter().any(|id| id == &item.id) {
        return Ok(ItemStatus::Skipped);
    }
    if !force {
        if let Some(test) = &item.test {
            if run_command(test).await? {
                return Ok(ItemStatus::Correct);
            }
        }
    }
    if run_command(&item.apply).await? {
        Ok(ItemStatus::Fixed)
    } else {
        Ok(ItemStatus::Failed)
    }
}

/// Run a shell command; Ok(true) on exit 0. An empty command or a spawn
/// failure is an error (fails the whole node), not an item failure.
async fn run_command(cmd: &str) -> Result<bool> {
    if cmd.trim().is_empty() {
        bail!("empty command");
    }
    let status = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .status()
        .await
        .with_context(|| format!("spawning `{}`", cmd))?;
    Ok(status.success())
}
