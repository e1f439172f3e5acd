// Excel file import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import keeps rows absolutely positioned: when a sheet's data range does
// not begin at A1, leading rows and columns are padded with empty cells so
// config row/column numbers address the sheet, not the trimmed range.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::Workbook;

use stockmerge_core::cell::{Cell, Row};

/// Read one sheet into rows of typed cells.
///
/// `sheet` selects a sheet by name; `None` reads the first sheet. The
/// count exports this tool consumes are single-sheet workbooks, so the
/// default is almost always right.
pub fn read_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<Row>, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("failed to open {}: {}", path.display(), e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(format!("{}: workbook contains no sheets", path.display()));
    }

    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(format!(
                    "{}: no sheet named '{}' (available: {})",
                    path.display(),
                    name,
                    sheet_names.join(", ")
                ));
            }
            name.to_string()
        }
        None => sheet_names[0].clone(),
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("failed to read sheet '{}': {}", sheet_name, e))?;

    let (height, _width) = range.get_size();

    // Range start offset (data may not begin at A1)
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut rows: Vec<Row> = Vec::with_capacity(start_row as usize + height);
    for _ in 0..start_row {
        rows.push(Row::new());
    }

    for sheet_row in range.rows() {
        let mut row: Row = Vec::with_capacity(start_col as usize + sheet_row.len());
        row.resize(start_col as usize, Cell::Empty);
        for data in sheet_row {
            row.push(convert(data));
        }
        rows.push(row);
    }

    Ok(rows)
}

fn convert(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Store error as text representation
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
        // Serial number. The merge only forwards these, never interprets them.
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Write a header row plus data rows to a new xlsx workbook.
pub fn write_rows(
    path: &Path,
    sheet_name: &str,
    headers: &[String],
    rows: &[Row],
) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(sheet_name)
        .map_err(|e| format!("failed to create sheet '{}': {}", sheet_name, e))?;

    for (col, label) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, label)
            .map_err(|e| format!("failed to write header ({}): {}", col, e))?;
    }

    for (r, row) in rows.iter().enumerate() {
        let row32 = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let col16 = c as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet
                        .write_string(row32, col16, s)
                        .map_err(|e| format!("failed to write cell ({}, {}): {}", r, c, e))?;
                }
                Cell::Number(n) => {
                    worksheet
                        .write_number(row32, col16, *n)
                        .map_err(|e| format!("failed to write cell ({}, {}): {}", r, c, e))?;
                }
            }
        }
    }

    workbook
        .save(path)
        .map_err(|e| format!("failed to save {}: {}", path.display(), e))?;

    Ok(())
}
