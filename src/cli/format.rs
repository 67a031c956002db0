//! Text rendering for numbers, records and summaries.

use calcbook_core::OwnerSummary;
use calcbook_domain::CalculationRecord;
use chrono::{DateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a number with fixed decimals when `precision` is set, otherwise
/// with the shortest representation that round-trips.
pub fn format_number(value: f64, precision: Option<u8>) -> String {
    match precision {
        Some(digits) => format!("{:.*}", digits as usize, value),
        None => format!("{}", value),
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Renders `a <symbol> b = result`.
pub fn expression(record: &CalculationRecord, precision: Option<u8>) -> String {
    format!(
        "{} {} {} = {}",
        format_number(record.operand_a, precision),
        record.operation.symbol(),
        format_number(record.operand_b, precision),
        format_number(record.result, precision)
    )
}

/// Detail lines for a single record.
pub fn record_details(record: &CalculationRecord, precision: Option<u8>) -> Vec<String> {
    vec![
        format!("  Id        : {}", record.id),
        format!("  Operation : {}", record.operation),
        format!("  Operand A : {}", format_number(record.operand_a, precision)),
        format!("  Operand B : {}", format_number(record.operand_b, precision)),
        format!("  Result    : {}", format_number(record.result, precision)),
        format!("  Created   : {}", format_timestamp(record.created_at)),
        format!("  Updated   : {}", format_timestamp(record.updated_at)),
    ]
}

pub fn summary_lines(summary: &OwnerSummary) -> Vec<String> {
    let mut lines = vec![format!("  Total     : {}", summary.total)];
    for (operation, count) in &summary.per_operation {
        lines.push(format!("  {:<10}: {}", operation.name(), count));
    }
    if let Some(at) = summary.last_updated {
        lines.push(format!("  Last edit : {}", format_timestamp(at)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcbook_domain::{Operation, OwnerId};
    use chrono::TimeZone;

    #[test]
    fn numbers_respect_precision() {
        assert_eq!(format_number(35.0, None), "35");
        assert_eq!(format_number(0.25, None), "0.25");
        assert_eq!(format_number(1.0 / 3.0, Some(2)), "0.33");
        assert_eq!(format_number(42.0, Some(1)), "42.0");
    }

    #[test]
    fn expression_uses_operation_symbol() {
        let at = Utc.with_ymd_and_hms(2025, 5, 4, 3, 2, 1).unwrap();
        let record = CalculationRecord::new(OwnerId(1), Operation::Divide, 1.0, 8.0, 0.125, at);
        assert_eq!(expression(&record, None), "1 / 8 = 0.125");
        assert_eq!(format_timestamp(at), "2025-05-04 03:02:01");
        assert!(record_details(&record, None)
            .iter()
            .any(|line| line.ends_with("divide")));
    }
}
