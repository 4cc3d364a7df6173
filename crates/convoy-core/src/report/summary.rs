//! Per-node stats summary and the end-of-run error digest.

use std::time::Duration;

use console::style;

use crate::apply::NodeReport;

use super::duration::format_duration;
use super::table::{render_table, Align, Row};

#[derive(Default)]
struct Totals {
    items: usize,
    correct: usize,
    fixed: usize,
    skipped: usize,
    failed: usize,
}

fn green_unless_zero(value: usize) -> String {
    emphasize(value, console::Style::new().green())
}

fn yellow_unless_zero(value: usize) -> String {
    emphasize(value, console::Style::new().yellow())
}

fn red_unless_zero(value: usize) -> String {
    emphasize(value, console::Style::new().red())
}

/// Zero counts render dimmed; non-zero counts carry the metric's color.
fn emphasize(value: usize, nonzero: console::Style) -> String {
    if value == 0 {
        style(value.to_string()).dim().to_string()
    } else {
        nonzero.apply_to(value.to_string()).to_string()
    }
}

/// Render the per-node summary table. One row per report in arrival order;
/// a total row appears only when more than one report is present, labeled
/// with the node count and showing the measured wall-clock duration of the
/// whole run rather than the per-row sum.
pub fn stats_summary_lines(results: &[NodeReport], total_duration: Duration) -> Vec<String> {
    let mut rows = vec![
        Row::Cells(vec![
            style("node").bold().to_string(),
            "items".to_string(),
            "OK".to_string(),
            style("fixed").green().to_string(),
            style("skipped").yellow().to_string(),
            style("failed").red().to_string(),
            "time".to_string(),
        ]),
        Row::Separator,
    ];

    let mut totals = Totals::default();
    for report in results {
        totals.items += report.item_count();
        totals.correct += report.correct;
        totals.fixed += report.fixed;
        totals.skipped += report.skipped;
        totals.failed += report.failed;
        rows.push(Row::Cells(vec![
            report.node_name.clone(),
            report.item_count().to_string(),
            report.correct.to_string(),
            green_unless_zero(report.fixed),
            yellow_unless_zero(report.skipped),
            red_unless_zero(report.failed),
            format_duration(report.duration),
        ]));
    }

    if results.len() > 1 {
        rows.push(Row::Separator);
        rows.push(Row::Cells(vec![
            style(format!("total ({} nodes)", results.len()))
                .bold()
                .to_string(),
            totals.items.to_string(),
            totals.correct.to_string(),
            green_unless_zero(totals.fixed),
            yellow_unless_zero(totals.skipped),
            red_unless_zero(totals.failed),
            format_duration(total_duration),
        ]));
    }

    let alignments = [
        Align::Left,
        Align::Right,
        Align::Right,
        Align::Right,
        Align::Right,
        Align::Right,
        Align::Right,
    ];
    render_table(&rows, &alignments)
}

/// Compact digest of every failure message, in arrival order. Empty input
/// produces no lines at all.
pub fn error_summary_lines(errors: &[String]) -> Vec<String> {
    if errors.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(errors.len() + 1);
    lines.push(format!("{} error(s):", errors.len()));
    for msg in errors {
        lines.push(format!("{} {}", style("!").red().bold(), msg));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, correct: usize, fixed: usize, failed: usize) -> NodeReport {
        let mut r = NodeReport::new(name);
        r.correct = correct;
        r.fixed = fixed;
        r.failed = failed;
        r.profiling_info = (0..correct + fixed + failed)
            .map(|i| (Duration::from_millis(10), format!("item-{}", i)))
            .collect();
        r.duration = Duration::from_secs(2);
        r
    }

    #[test]
    fn single_result_has_no_total_row() {
        let lines = stats_summary_lines(&[report("web-1", 5, 0, 0)], Duration::from_secs(2));
        // Header, separator, one data row.
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("web-1"));
        assert!(!lines.iter().any(|l| l.contains("total")));
    }

    #[test]
    fn multiple_results_append_total_row_with_run_duration() {
        let reports = [report("a", 1, 2, 0), report("b", 3, 0, 1)];
        // Run wall time differs from the 4s sum of row durations.
        let lines = stats_summary_lines(&reports, Duration::from_secs(3));
        assert_eq!(lines.len(), 6);
        let total = lines.last().unwrap();
        assert!(total.contains("total (2 nodes)"));
        assert!(total.contains("3s"));
        assert!(!total.contains("4s"));
    }

    #[test]
    fn rows_keep_arrival_order() {
        let reports = [report("z-last", 1, 0, 0), report("a-first", 1, 0, 0)];
        let lines = stats_summary_lines(&reports, Duration::from_secs(1));
        assert!(lines[2].contains("z-last"));
        assert!(lines[3].contains("a-first"));
    }

    #[test]
    fn summary_rendering_is_idempotent() {
        let reports = [report("a", 1, 1, 1), report("b", 0, 0, 0)];
        let first = stats_summary_lines(&reports, Duration::from_secs(9));
        let second = stats_summary_lines(&reports, Duration::from_secs(9));
        assert_eq!(first, second);
    }

    #[test]
    fn error_digest_is_empty_without_errors() {
        assert!(error_summary_lines(&[]).is_empty());
    }

    #[test]
    fn error_digest_lists_every_message() {
        let errors = vec!["web-1: boom".to_string(), "db-1: crash".to_string()];
        let lines = error_summary_lines(&errors);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("2 error(s):"));
        assert!(lines[1].contains("web-1: boom"));
        assert!(lines[2].contains("db-1: crash"));
    }
}
