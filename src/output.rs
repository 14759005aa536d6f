//! Terminal output helpers: colored status lines and plain-text tables.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::style::Stylize;

use crate::theme;

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);

/// Enables or disables ANSI colors for all subsequent output.
pub fn set_color(enabled: bool) {
    COLOR_ENABLED.store(enabled, Ordering::Relaxed);
    crossterm::style::force_color_output(enabled);
}

fn colored(msg: &str, color: crossterm::style::Color) -> String {
    if COLOR_ENABLED.load(Ordering::Relaxed) {
        msg.with(color).to_string()
    } else {
        msg.to_string()
    }
}

/// Writes a green success line.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn success(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", colored(msg, theme::SUCCESS))
}

/// Writes a yellow notice line (an empty but valid result).
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn notice(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", colored(msg, theme::WARNING))
}

/// Writes a red failure line that does not abort the command.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn failure(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", colored(msg, theme::ERROR))
}

/// Colors `msg` unless colors are disabled.
#[must_use]
pub fn paint(msg: &str, color: crossterm::style::Color) -> String {
    colored(msg, color)
}

/// Renders rows as a left-aligned table with a dashed rule under the header.
///
/// ```text
/// Metric  Value
/// ------  -------
/// Total   1.00 GB
/// ```
#[must_use]
pub fn render_table<R: AsRef<str>>(headers: &[&str], rows: &[Vec<R>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.as_ref().chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let mut table = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    push_row(&mut table, &header_cells, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut table, &rule, &widths);
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| c.as_ref().to_string()).collect();
        push_row(&mut table, &cells, &widths);
    }
    table
}

fn push_row(table: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = widths[i].saturating_sub(cell.chars().count());
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
    }
    table.push_str(line.trim_end());
    table.push('\n');
}

/// Formats a byte count as decimal gigabytes with two decimals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn gigabytes(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / 1_000_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_alignment() {
        let rows = vec![vec!["Total", "1.00 GB"], vec!["Free", "0.25 GB"]];
        let table = render_table(&["Metric", "Value"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Metric  Value");
        assert_eq!(lines[1], "------  -------");
        assert_eq!(lines[2], "Total   1.00 GB");
        assert_eq!(lines[3], "Free    0.25 GB");
    }

    #[test]
    fn test_render_table_empty_rows() {
        let rows: Vec<Vec<String>> = Vec::new();
        let table = render_table(&["PID", "Name"], &rows);
        assert_eq!(table, "PID  Name\n---  ----\n");
    }

    #[test]
    fn test_gigabytes() {
        assert_eq!(gigabytes(0), "0.00 GB");
        assert_eq!(gigabytes(1_500_000_000), "1.50 GB");
    }

    #[test]
    fn test_status_lines_contain_message() {
        let mut out = Vec::new();
        success(&mut out, "done").unwrap();
        notice(&mut out, "nothing").unwrap();
        failure(&mut out, "broken").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("done"));
        assert!(text.contains("nothing"));
        assert!(text.contains("broken"));
        assert_eq!(text.lines().count(), 3);
    }
}
