//! `stockmerge inspect`: print a file's layout for writing merge configs.
//!
//! Positions are 1-based to match `data_start_row` / `key_column` in the
//! config file. Layout goes to stdout; it is the command's output.

use std::path::PathBuf;

use stockmerge_core::cell::row_is_empty;

use crate::{read_table, CliError};

pub fn cmd_inspect(file: PathBuf, sheet: Option<String>, rows: usize) -> Result<(), CliError> {
    let table = read_table(&file, sheet.as_deref())?;

    let non_empty = table.iter().filter(|r| !row_is_empty(r)).count();
    let widest = table.iter().map(|r| r.len()).max().unwrap_or(0);

    println!("{}", file.display());
    println!(
        "rows: {} ({} non-empty), widest row: {} columns",
        table.len(),
        non_empty,
        widest
    );

    let mut shown = 0usize;
    for (idx, row) in table.iter().enumerate() {
        if shown >= rows {
            break;
        }
        if row_is_empty(row) {
            continue;
        }
        shown += 1;

        println!();
        println!("row {}:", idx + 1);
        for (col, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            println!("  {:<4}{:>3}  {}", col_letter(col), col + 1, preview(&cell.display()));
        }
    }

    Ok(())
}

/// Convert column index to Excel column letter (0 = A, 25 = Z, 26 = AA, etc.)
fn col_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Cap long cell values so one value stays on one line.
fn preview(value: &str) -> String {
    const MAX: usize = 60;
    if value.chars().count() <= MAX {
        value.to_string()
    } else {
        let cut: String = value.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(col_letter(0), "A");
        assert_eq!(col_letter(7), "H");
        assert_eq!(col_letter(17), "R");
        assert_eq!(col_letter(25), "Z");
        assert_eq!(col_letter(26), "AA");
        assert_eq!(col_letter(51), "AZ");
        assert_eq!(col_letter(52), "BA");
    }

    #[test]
    fn preview_caps_long_values() {
        let short = "barcode";
        assert_eq!(preview(short), "barcode");

        let long = "x".repeat(100);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 63);
    }
}
