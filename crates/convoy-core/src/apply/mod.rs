//! Apply orchestration: run every selected node's convergence once through
//! the worker pool and collect the run aggregate.

mod options;
mod result;
mod run;

pub use options::ApplyOptions;
pub use result::{ApplyRun, NodeReport};
pub use run::{apply_nodes, Node};
