//! Plain-text table rendering for calculation listings.

use calcbook_domain::CalculationRecord;

use crate::cli::format::{expression, format_timestamp};

const HEADERS: [&str; 4] = ["ID", "OPERATION", "CALCULATION", "UPDATED"];
const COLUMN_GAP: &str = "  ";

/// Renders records as aligned rows, truncating lines to `max_width` when given.
pub fn render_records(
    records: &[CalculationRecord],
    precision: Option<u8>,
    max_width: Option<usize>,
) -> Vec<String> {
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|record| {
            [
                record.id.to_string(),
                record.operation.to_string(),
                expression(record, precision),
                format_timestamp(record.updated_at),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = HEADERS.map(str::to_string);
    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| clamp(render_row(row, &widths), max_width))
        .collect()
}

/// Terminal width when stdout is a terminal.
pub fn terminal_width() -> Option<usize> {
    crossterm::terminal::size()
        .ok()
        .map(|(columns, _)| columns as usize)
        .filter(|columns| *columns > 0)
}

fn render_row(row: &[String; 4], widths: &[usize; 4]) -> String {
    let cells: Vec<String> = row
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    cells.join(COLUMN_GAP).trim_end().to_string()
}

fn clamp(line: String, max_width: Option<usize>) -> String {
    match max_width {
        Some(max) if line.chars().count() > max && max > 1 => {
            let mut clipped: String = line.chars().take(max - 1).collect();
            clipped.push('~');
            clipped
        }
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcbook_domain::{Operation, OwnerId};
    use chrono::{TimeZone, Utc};

    fn record(operation: Operation, a: f64, b: f64) -> CalculationRecord {
        let at = Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap();
        CalculationRecord::new(OwnerId(1), operation, a, b, operation.apply(a, b), at)
    }

    #[test]
    fn renders_header_and_aligned_rows() {
        let records = vec![record(Operation::Add, 1.0, 2.0), record(Operation::Multiply, 6.0, 7.0)];
        let lines = render_records(&records, None, None);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("1 + 2 = 3"));
        assert!(lines[2].contains("6 * 7 = 42"));
        let column = lines[0].find("OPERATION").unwrap();
        assert_eq!(&lines[1][column..column + 3], "add");
        assert_eq!(&lines[2][column..column + 8], "multiply");
    }

    #[test]
    fn clamps_lines_to_width() {
        let records = vec![record(Operation::Subtract, 10.0, 4.0)];
        let lines = render_records(&records, None, Some(20));
        assert!(lines.iter().all(|line| line.chars().count() <= 20));
        assert!(lines[1].ends_with('~'));
    }
}
