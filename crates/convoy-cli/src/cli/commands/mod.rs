mod apply;
mod nodes;

pub use apply::{run_apply, ApplyArgs};
pub use nodes::run_nodes;
