//! `convoy nodes` – list inventory nodes.

use std::path::Path;

use anyhow::Result;
use convoy_core::inventory::Inventory;

pub fn run_nodes(inventory_path: Option<&Path>) -> Result<()> {
    let path = inventory_path.unwrap_or_else(|| Path::new("inventory.toml"));
    let inventory = Inventory::load(path)?;
    if inventory.nodes.is_empty() {
        println!("No nodes in inventory.");
    } else {
        println!("{:<24} {}", "NODE", "ITEMS");
        for node in &inventory.nodes {
            println!("{:<24} {}", node.name, node.items.len());
        }
    }
    Ok(())
}
