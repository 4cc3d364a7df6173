//! Plain-text table rendering with ANSI-aware column widths.

use console::measure_text_width;

/// Column alignment for data cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One table row: either cells or a horizontal separator.
pub enum Row {
    Cells(Vec<String>),
    Separator,
}

/// Render rows into lines. Column widths are measured with ANSI escapes
/// stripped, so styled cells line up with plain ones. `alignments` applies
/// per column; missing entries default to left. Pure function of its input:
/// rendering the same rows twice yields identical lines.
pub fn render_table(rows: &[Row], alignments: &[Align]) -> Vec<String> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        if let Row::Cells(cells) = row {
            for (i, cell) in cells.iter().enumerate() {
                let w = measure_text_width(cell);
                if i >= widths.len() {
                    widths.push(w);
                } else if w > widths[i] {
                    widths[i] = w;
                }
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        match row {
            Row::Separator => {
                let line = widths
                    .iter()
                    .map(|w| "-".repeat(*w))
                    .collect::<Vec<_>>()
                    .join("  ");
                lines.push(line);
            }
            Row::Cells(cells) => {
                let mut parts = Vec::with_capacity(cells.len());
                for (i, cell) in cells.iter().enumerate() {
                    let width = widths.get(i).copied().unwrap_or(0);
                    let pad = " ".repeat(width.saturating_sub(measure_text_width(cell)));
                    match alignments.get(i).copied().unwrap_or(Align::Left) {
                        Align::Left => parts.push(format!("{}{}", cell, pad)),
                        Align::Right => parts.push(format!("{}{}", pad, cell)),
                    }
                }
                lines.push(parts.join("  ").trim_end().to_string());
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns() {
        let rows = vec![
            Row::Cells(vec!["name".into(), "count".into()]),
            Row::Separator,
            Row::Cells(vec!["a".into(), "7".into()]),
            Row::Cells(vec!["longer".into(), "1234".into()]),
        ];
        let lines = render_table(&rows, &[Align::Left, Align::Right]);
        assert_eq!(lines[0], "name    count");
        assert_eq!(lines[1], "------  -----");
        assert_eq!(lines[2], "a           7");
        assert_eq!(lines[3], "longer   1234");
    }

    #[test]
    fn rendering_is_idempotent() {
        let rows = vec![
            Row::Cells(vec!["x".into(), "y".into()]),
            Row::Separator,
            Row::Cells(vec!["node-1".into(), "0".into()]),
        ];
        let first = render_table(&rows, &[Align::Left, Align::Right]);
        let second = render_table(&rows, &[Align::Left, Align::Right]);
        assert_eq!(first, second);
    }

    #[test]
    fn styled_cells_do_not_break_widths() {
        let styled = console::Style::new().green().force_styling(true);
        let rows = vec![
            Row::Cells(vec!["name".into(), "fixed".into()]),
            Row::Cells(vec!["n".into(), styled.apply_to("3").to_string()]),
        ];
        let lines = render_table(&rows, &[Align::Left, Align::Right]);
        // The styled "3" must still occupy a 5-wide column.
        assert_eq!(measure_text_width(&lines[1]), measure_text_width(&lines[0]));
    }
}
