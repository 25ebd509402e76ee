//! Grouped table rendering for the ledger view
//!
//! The ledger view is sorted so rows sharing a part ID are contiguous;
//! rendering derives the "merged cell" effect by comparing adjacent part
//! IDs and blanking the ID/part columns on continuation rows. No span
//! state lives in the core.

use console::style;

use crate::cli::helpers::{escape_csv, pad_cell};
use crate::core::DefectRecord;

/// Display headers, in on-screen column order
pub const HEADERS: [&str; 9] = [
    "ID", "PART", "AREA", "QTY1", "TYPE1", "QTY2", "TYPE2", "NOTE", "DATES",
];

/// CSV column keys (data export keeps full rows, no cell suppression)
const CSV_KEYS: [&str; 9] = [
    "part_id",
    "part_name",
    "area",
    "defect1_count",
    "defect1_type",
    "defect2_count",
    "defect2_type",
    "note",
    "timestamp_log",
];

/// Columns that wrap when `--wrap` is given (the two append-only logs)
const WRAPPED: [usize; 2] = [7, 8];

/// True at every index where a new part group begins
pub fn group_starts(records: &[&DefectRecord]) -> Vec<bool> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| i == 0 || records[i - 1].part_id != r.part_id)
        .collect()
}

/// A record's cells as display text, in on-screen column order
pub fn display_cells(record: &DefectRecord) -> [String; 9] {
    [
        record.part_id.clone(),
        record.part_name.clone(),
        record.area.clone(),
        record.defect1_count.to_string(),
        record.defect1_type.clone(),
        record.defect2_count.to_string(),
        record.defect2_type.clone(),
        record.note.clone(),
        record.timestamp_log.clone(),
    ]
}

/// Wrap text at word boundaries. Words longer than the width get a line
/// of their own rather than being broken mid-word.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width < 5 || text.chars().count() <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Each record's cells split into lines, with the log columns wrapped
fn wrapped_rows(records: &[&DefectRecord], wrap: Option<usize>) -> Vec<[Vec<String>; 9]> {
    records
        .iter()
        .map(|record| {
            let cells = display_cells(record);
            let mut row: [Vec<String>; 9] = Default::default();
            for (col, cell) in cells.into_iter().enumerate() {
                row[col] = match wrap {
                    Some(width) if WRAPPED.contains(&col) => wrap_text(&cell, width),
                    _ => vec![cell],
                };
            }
            row
        })
        .collect()
}

/// Column widths in characters, sized to the widest wrapped line with the
/// header as a floor
fn column_widths(rows: &[[Vec<String>; 9]]) -> [usize; 9] {
    let mut widths = [0usize; 9];
    for (col, header) in HEADERS.iter().enumerate() {
        widths[col] = header.chars().count();
    }
    for row in rows {
        for (col, lines) in row.iter().enumerate() {
            for line in lines {
                widths[col] = widths[col].max(line.chars().count());
            }
        }
    }
    widths
}

/// Styled terminal table with group-merged ID/part columns
pub fn render_tsv(records: &[&DefectRecord], wrap: Option<usize>) {
    let starts = group_starts(records);
    let rows = wrapped_rows(records, wrap);
    let widths = column_widths(&rows);

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| style(pad_cell(h, w)).bold().to_string())
        .collect();
    println!("{}", header.join("  "));

    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    println!("{}", "-".repeat(total));

    for (i, row) in rows.iter().enumerate() {
        let line_count = row.iter().map(|lines| lines.len()).max().unwrap_or(1);
        for line_idx in 0..line_count {
            let mut parts = Vec::with_capacity(9);
            for (col, lines) in row.iter().enumerate() {
                let suppressed = col < 2 && !starts[i];
                let content = if suppressed {
                    ""
                } else {
                    lines.get(line_idx).map(String::as_str).unwrap_or("")
                };
                let cell = pad_cell(content, widths[col]);
                if col == 0 {
                    parts.push(style(cell).cyan().to_string());
                } else {
                    parts.push(cell);
                }
            }
            println!("{}", parts.join("  "));
        }
    }

    let parts = starts.iter().filter(|s| **s).count();
    println!();
    println!(
        "{} record(s) across {} part(s).",
        style(records.len()).cyan(),
        style(parts).cyan()
    );
}

/// CSV output: full values on every row, RFC 4180 escaping
pub fn render_csv(records: &[&DefectRecord]) {
    println!("{}", CSV_KEYS.join(","));
    for record in records {
        let cells = display_cells(record);
        let escaped: Vec<String> = cells.iter().map(|c| escape_csv(c)).collect();
        println!("{}", escaped.join(","));
    }
}

/// Markdown table with the same group suppression as the terminal view
pub fn render_md(records: &[&DefectRecord]) {
    let starts = group_starts(records);

    println!("| {} |", HEADERS.join(" | "));
    let separators: Vec<&str> = HEADERS.iter().map(|_| "---").collect();
    println!("|{}|", separators.join("|"));

    for (i, record) in records.iter().enumerate() {
        let mut cells = display_cells(record);
        if !starts[i] {
            cells[0] = String::new();
            cells[1] = String::new();
        }
        let escaped: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
        println!("| {} |", escaped.join(" | "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(part_id: &str, area: &str) -> DefectRecord {
        DefectRecord {
            part_id: part_id.to_string(),
            part_name: "Bracket".to_string(),
            area: area.to_string(),
            defect1_count: 1,
            defect1_type: "-".to_string(),
            defect2_count: 0,
            defect2_type: "-".to_string(),
            note: "добавлена запись".to_string(),
            timestamp_log: "2026-01-05 09:30".to_string(),
        }
    }

    #[test]
    fn test_group_starts_marks_boundaries() {
        let a1 = record("P1", "A1");
        let a2 = record("P1", "A2");
        let b1 = record("P2", "A1");
        let rows = vec![&a1, &a2, &b1];

        assert_eq!(group_starts(&rows), [true, false, true]);
    }

    #[test]
    fn test_group_starts_empty() {
        assert!(group_starts(&[]).is_empty());
    }

    #[test]
    fn test_wrap_text_word_boundary() {
        assert_eq!(wrap_text("hello", 20), vec!["hello"]);
        assert_eq!(
            wrap_text("hello world foo bar", 11),
            vec!["hello world", "foo bar"]
        );
    }

    #[test]
    fn test_wrap_text_log_entries() {
        let log = "2026-01-05 09:30, 2026-01-05 10:15";
        let lines = wrap_text(log, 18);
        assert_eq!(lines, vec!["2026-01-05 09:30,", "2026-01-05 10:15"]);
    }

    #[test]
    fn test_column_widths_floor_at_header() {
        let r = record("P", "A");
        let rows = wrapped_rows(&[&r], None);
        let widths = column_widths(&rows);
        // QTY1 header is wider than the single-digit count
        assert_eq!(widths[3], "QTY1".chars().count());
        // Note column sized to the Cyrillic marker's character count
        assert_eq!(widths[7], "добавлена запись".chars().count());
    }
}
