//! The fixed option bundle shared by every task in one run.

/// Options passed unchanged to every node apply. One bundle per run, no
/// per-target variation.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Item ids to mark skipped without running them.
    pub autoskip: Vec<String>,
    /// Re-apply items even when their test reports them correct.
    pub force: bool,
    /// Allow node implementations that prompt to do so. Command nodes
    /// ignore this and apply unconditionally.
    pub interactive: bool,
    /// Concurrency limit for item execution inside one node.
    pub item_workers: usize,
    /// Print per-item timing after each node completes.
    pub profiling: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            autoskip: Vec::new(),
            force: false,
            interactive: false,
            item_workers: 4,
            profiling: false,
        }
    }
}
