//! Run reporting: the per-node stats table and the end-of-run error digest.

mod duration;
mod summary;
mod table;

pub use duration::format_duration;
pub use summary::{error_summary_lines, stats_summary_lines};
pub use table::{render_table, Align, Row};
