//! `convoy apply` – run every selected node through the worker pool.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use convoy_core::apply::{apply_nodes, ApplyOptions};
use convoy_core::config::ConvoyConfig;
use convoy_core::hooks::{Hook, HookRegistry};
use convoy_core::inventory::Inventory;
use convoy_core::report::{error_summary_lines, stats_summary_lines};

/// Arguments for one apply run, resolved from CLI flags.
#[derive(Debug)]
pub struct ApplyArgs {
    pub targets: Vec<String>,
    pub workers: Option<usize>,
    pub item_workers: Option<usize>,
    pub autoskip: Vec<String>,
    pub force: bool,
    pub interactive: bool,
    pub profiling: bool,
    pub summary: bool,
    pub inventory: Option<PathBuf>,
}

/// Hook that records run boundaries in the log.
struct LogHook;

impl Hook for LogHook {
    fn apply_start(&self, nodes: &[String], opts: &ApplyOptions) -> Result<()> {
        tracing::info!(
            "apply starting for {} node(s) (force={}, interactive={})",
            nodes.len(),
            opts.force,
            opts.interactive
        );
        Ok(())
    }

    fn apply_end(&self, nodes: &[String], duration: Duration) -> Result<()> {
        tracing::info!(
            "apply finished for {} node(s) in {:.1}s",
            nodes.len(),
            duration.as_secs_f64()
        );
        Ok(())
    }
}

/// Runs the apply and returns the process exit code: 0 when every node
/// succeeded or skipped, 1 when any task failed.
pub async fn run_apply(cfg: &ConvoyConfig, args: ApplyArgs) -> Result<i32> {
    let inventory_path = args
        .inventory
        .unwrap_or_else(|| PathBuf::from("inventory.toml"));
    let inventory = Inventory::load(&inventory_path)?;
    let nodes = inventory.select(&args.targets)?;
    if nodes.is_empty() {
        println!("No nodes in inventory.");
        return Ok(0);
    }

    let opts = ApplyOptions {
        autoskip: args.autoskip,
        force: args.force,
        interactive: args.interactive,
        item_workers: args.item_workers.unwrap_or(cfg.item_workers),
        profiling: args.profiling,
    };
    let workers = args.workers.unwrap_or(cfg.node_workers);

    let mut hooks = HookRegistry::new();
    hooks.register(Box::new(LogHook));

    let run = apply_nodes(&nodes, &opts, workers, &hooks).await?;

    if args.summary && !run.results.is_empty() {
        for line in stats_summary_lines(&run.results, run.duration) {
            println!("{}", line);
        }
    }
    for line in error_summary_lines(&run.errors) {
        eprintln!("{}", line);
    }

    Ok(run.exit_code())
}
