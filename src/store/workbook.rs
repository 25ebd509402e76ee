//! Ledger workbook I/O
//!
//! Reads and writes the `engineering_data.xlsx`-style workbook: one sheet,
//! a header row, and one row per defect record in the fixed column order
//! used by the original tool. The ID column is always treated as text so
//! leading zeros and alphanumeric IDs survive a round trip.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use crate::core::record::{DefectRecord, TYPE_PLACEHOLDER};
use crate::core::Ledger;
use crate::store::StoreError;

/// Sheet name used by the original tool
pub const SHEET_NAME: &str = "Данные";

/// Required columns, in the fixed on-disk order
pub const COLUMNS: [&str; 9] = [
    "ID",
    "Деталь",
    "Участок",
    "Количество_брака_1",
    "Тип_дефекта_1",
    "Количество_брака_2",
    "Тип_дефекта_2",
    "Примечание",
    "Дата",
];

/// Extra character width added to every column beyond its longest cell
const WIDTH_MARGIN: usize = 2;

/// Load the ledger from a workbook.
///
/// A missing file is an empty ledger. A file whose header row lacks any
/// required column is a schema error; the caller decides how to degrade.
pub fn load_ledger(path: &Path) -> Result<Ledger, StoreError> {
    if !path.exists() {
        return Ok(Ledger::new());
    }

    let read_err = |e: calamine::XlsxError| StoreError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(read_err)?;

    // Prefer the canonical sheet name, fall back to the first sheet
    let range = match workbook.worksheet_range(SHEET_NAME) {
        Ok(range) => range,
        Err(_) => {
            let first = workbook
                .sheet_names()
                .into_iter()
                .next()
                .ok_or(StoreError::MissingHeader {
                    path: path.to_path_buf(),
                })?;
            workbook.worksheet_range(&first).map_err(read_err)?
        }
    };

    let mut rows = range.rows();
    let header = rows.next().ok_or(StoreError::MissingHeader {
        path: path.to_path_buf(),
    })?;

    let columns = header_map(path, header)?;

    let mut records = Vec::new();
    for row in rows {
        // Skip fully blank rows rather than producing phantom records
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        let defect1_type = cell_text(row, columns["Тип_дефекта_1"]);
        let defect2_type = cell_text(row, columns["Тип_дефекта_2"]);

        records.push(DefectRecord {
            part_id: cell_text(row, columns["ID"]),
            part_name: cell_text(row, columns["Деталь"]),
            area: cell_text(row, columns["Участок"]),
            defect1_count: cell_count(row, columns["Количество_брака_1"]),
            defect1_type: if defect1_type.is_empty() {
                TYPE_PLACEHOLDER.to_string()
            } else {
                defect1_type
            },
            defect2_count: cell_count(row, columns["Количество_брака_2"]),
            defect2_type: if defect2_type.is_empty() {
                TYPE_PLACEHOLDER.to_string()
            } else {
                defect2_type
            },
            note: cell_text(row, columns["Примечание"]),
            timestamp_log: cell_text(row, columns["Дата"]),
        });
    }

    Ok(Ledger::from_records(records))
}

/// Write the whole ledger to a workbook.
///
/// Every cell carries a wrap-text format, and each column is sized to its
/// longest cell content (in characters) plus a small margin.
pub fn save_ledger(ledger: &Ledger, path: &Path) -> Result<(), StoreError> {
    let write_err = |e: rust_xlsxwriter::XlsxError| StoreError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut workbook = Workbook::new();
    let wrap = Format::new().set_text_wrap();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(write_err)?;

    let mut widths: Vec<usize> = COLUMNS.iter().map(|h| h.chars().count()).collect();

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &wrap)
            .map_err(write_err)?;
    }

    for (i, record) in ledger.records().iter().enumerate() {
        let row = (i + 1) as u32;
        let cells = record_cells(record);
        for (col, value) in cells.iter().enumerate() {
            widths[col] = widths[col].max(value.chars().count());
        }

        // Counts go out as numbers; everything else (the ID included) as text
        worksheet
            .write_string_with_format(row, 0, &record.part_id, &wrap)
            .map_err(write_err)?;
        worksheet
            .write_string_with_format(row, 1, &record.part_name, &wrap)
            .map_err(write_err)?;
        worksheet
            .write_string_with_format(row, 2, &record.area, &wrap)
            .map_err(write_err)?;
        worksheet
            .write_number_with_format(row, 3, record.defect1_count, &wrap)
            .map_err(write_err)?;
        worksheet
            .write_string_with_format(row, 4, &record.defect1_type, &wrap)
            .map_err(write_err)?;
        worksheet
            .write_number_with_format(row, 5, record.defect2_count, &wrap)
            .map_err(write_err)?;
        worksheet
            .write_string_with_format(row, 6, &record.defect2_type, &wrap)
            .map_err(write_err)?;
        worksheet
            .write_string_with_format(row, 7, &record.note, &wrap)
            .map_err(write_err)?;
        worksheet
            .write_string_with_format(row, 8, &record.timestamp_log, &wrap)
            .map_err(write_err)?;
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, (width + WIDTH_MARGIN) as f64)
            .map_err(write_err)?;
    }

    workbook.save(path).map_err(write_err)?;
    Ok(())
}

/// Map required column names to their indices in the header row
fn header_map(path: &Path, header: &[Data]) -> Result<HashMap<&'static str, usize>, StoreError> {
    let names: Vec<String> = header.iter().map(|cell| cell.to_string().trim().to_string()).collect();

    let mut columns = HashMap::new();
    for required in COLUMNS {
        let idx = names
            .iter()
            .position(|name| name == required)
            .ok_or_else(|| StoreError::MissingColumn {
                path: path.to_path_buf(),
                column: required.to_string(),
            })?;
        columns.insert(required, idx);
    }
    Ok(columns)
}

/// A cell as text. Numeric cells lose any spurious `.0` so IDs that Excel
/// coerced to numbers still read back as clean identifiers.
fn cell_text(row: &[Data], idx: usize) -> String {
    match row.get(idx) {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{}", *f as i64),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// A cell as a defect count. Blank or unparseable cells default to 0.
fn cell_count(row: &[Data], idx: usize) -> u32 {
    match row.get(idx) {
        Some(Data::Float(f)) if *f >= 0.0 => *f as u32,
        Some(Data::Int(i)) if *i >= 0 => *i as u32,
        Some(Data::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// The record's cells in on-disk column order, as display text
fn record_cells(record: &DefectRecord) -> [String; 9] {
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
