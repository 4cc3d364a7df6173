//! CLI for the convoy apply tool.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use convoy_core::config;
use std::path::PathBuf;

use commands::{run_apply, run_nodes, ApplyArgs};

/// Top-level CLI for convoy.
#[derive(Debug, Parser)]
#[command(name = "convoy")]
#[command(about = "convoy: apply configuration to node fleets in parallel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Apply configuration to the selected nodes.
    Apply {
        /// Node names to apply; empty selects every inventory node.
        targets: Vec<String>,

        /// Apply up to N nodes concurrently (default from config).
        #[arg(short, long, value_name = "N")]
        workers: Option<usize>,

        /// Run up to N items concurrently inside one node (default from config).
        #[arg(long, value_name = "N")]
        item_workers: Option<usize>,

        /// Item ids to mark skipped without running them (repeatable).
        #[arg(long, value_name = "ITEM")]
        autoskip: Vec<String>,

        /// Re-apply items even when their test reports them correct.
        #[arg(long)]
        force: bool,

        /// Let node implementations prompt before fixing items.
        #[arg(long)]
        interactive: bool,

        /// Print per-item timing for each node as it completes.
        #[arg(long)]
        profiling: bool,

        /// Print the per-node stats table after the run.
        #[arg(short, long)]
        summary: bool,

        /// Inventory file (default: ./inventory.toml).
        #[arg(long, value_name = "PATH")]
        inventory: Option<PathBuf>,
    },

    /// List inventory nodes and their item counts.
    Nodes {
        /// Inventory file (default: ./inventory.toml).
        #[arg(long, value_name = "PATH")]
        inventory: Option<PathBuf>,
    },
}

impl CliCommand {
    /// Parse argv, dispatch, and return the process exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Apply {
                targets,
                workers,
                item_workers,
                autoskip,
                force,
                interactive,
                profiling,
                summary,
                inventory,
            } => {
                run_apply(
                    &cfg,
                    ApplyArgs {
                        targets,
                        workers,
                        item_workers,
                        autoskip,
                        force,
                        interactive,
                        profiling,
                        summary,
                        inventory,
                    },
                )
                .await
            }
            CliCommand::Nodes { inventory } => {
                run_nodes(inventory.as_deref())?;
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests;
