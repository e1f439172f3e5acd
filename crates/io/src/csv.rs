// CSV/TSV import/export
//
// Fields pass through `Cell::from_input` on the way in, so numeric text
// from an untyped source behaves like a typed Excel cell downstream.

use std::io::Read;
use std::path::Path;

use stockmerge_core::cell::{Cell, Row};

/// Read a delimited file into rows of typed cells.
///
/// `delimiter` forces a separator; `None` sniffs one from the content.
pub fn read_rows(path: &Path, delimiter: Option<u8>) -> Result<Vec<Row>, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(&content));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows: Vec<Row> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(Cell::from_input).collect());
    }

    Ok(rows)
}

/// Pick the most likely field delimiter from a sample of the content.
///
/// Each candidate (tab, semicolon, comma, pipe) is scored by how many of
/// the first lines it splits into the same >1 field count as line 1;
/// wider splits win ties. Quoting is respected, so commas inside quoted
/// fields do not fool a semicolon file.
fn sniff_delimiter(content: &str) -> u8 {
    const CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];

    let sample: Vec<&str> = content.lines().take(10).collect();
    if sample.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for delim in CANDIDATES {
        let counts: Vec<usize> = sample.iter().map(|line| fields_in(line, delim)).collect();

        // A viable delimiter must split the first line at all
        let target = counts[0];
        if target <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Number of fields one line parses into under `delim` (1 if unparseable).
fn fields_in(line: &str, delim: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map(|r| r.len())
        .unwrap_or(1)
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| format!("failed to open {}: {}", path.display(), e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Write a header row plus data rows as delimited text.
///
/// Rows may be variable width: trailing empty cells are omitted, so
/// different rows can have different field counts.
pub fn write_rows(
    path: &Path,
    headers: &[String],
    rows: &[Row],
    delimiter: u8,
) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    writer.write_record(headers).map_err(|e| e.to_string())?;

    for row in rows {
        let mut record: Vec<String> = row.iter().map(Cell::display).collect();
        let last_non_empty = record
            .iter()
            .rposition(|field| !field.is_empty())
            .map_or(1, |i| i + 1);
        record.truncate(last_non_empty);
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}
