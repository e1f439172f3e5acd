// Scalar cell model shared by every stage of the merge pipeline.
//
// Sources hand us loosely typed values (text, numbers, blanks). The
// engine needs exactly two typed views of a cell: a join-key string and
// an integer stock quantity. Both conversions live here so the loaders
// and the join agree on them.

/// A single cell from a tabular source.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl Cell {
    /// Parse free text into a typed cell. Numeric-looking text becomes a
    /// number so untyped sources (CSV) line up with typed ones (XLSX).
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        if let Ok(num) = trimmed.parse::<f64>() {
            return Cell::Number(num);
        }
        Cell::Text(trimmed.to_string())
    }

    /// Join-key text: trimmed, `None` when blank. Numeric cells render
    /// integer-style so a barcode stored as a number still matches its
    /// text form.
    pub fn key_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Cell::Number(n) => Some(format_number(*n)),
        }
    }

    /// Stock quantity. Numbers truncate toward zero, non-numeric text
    /// degrades to 0 rather than aborting the load, and `None` marks a
    /// cell with no value at all.
    pub fn stock_value(&self) -> Option<i64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(*n as i64),
            Cell::Text(_) => Some(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Rendering for reports and delimited-text export.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
        }
    }
}

/// Whole numbers print without a decimal point so barcodes and counts
/// stay readable.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// One row of a tabular source. Cells are positional: index 0 is column
/// A, index 7 is column H, and so on.
pub type Row = Vec<Cell>;

/// True when the row has no populated cells.
pub fn row_is_empty(row: &Row) -> bool {
    row.iter().all(Cell::is_empty)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_input_parses_numbers() {
        assert_eq!(Cell::from_input("42"), Cell::Number(42.0));
        assert_eq!(Cell::from_input("  3.5 "), Cell::Number(3.5));
        assert_eq!(Cell::from_input("-7"), Cell::Number(-7.0));
    }

    #[test]
    fn from_input_keeps_text() {
        assert_eq!(Cell::from_input("widget"), Cell::Text("widget".into()));
        assert_eq!(Cell::from_input(" P-001 "), Cell::Text("P-001".into()));
    }

    #[test]
    fn from_input_blank_is_empty() {
        assert_eq!(Cell::from_input(""), Cell::Empty);
        assert_eq!(Cell::from_input("   "), Cell::Empty);
    }

    #[test]
    fn key_text_trims() {
        assert_eq!(Cell::Text(" A1 ".into()).key_text(), Some("A1".into()));
        assert_eq!(Cell::Text("   ".into()).key_text(), None);
        assert_eq!(Cell::Empty.key_text(), None);
    }

    #[test]
    fn key_text_renders_numeric_barcodes_without_decimal() {
        assert_eq!(
            Cell::Number(8801234567890.0).key_text(),
            Some("8801234567890".into())
        );
        assert_eq!(Cell::Number(12.5).key_text(), Some("12.5".into()));
    }

    #[test]
    fn stock_value_truncates_numbers() {
        assert_eq!(Cell::Number(12.0).stock_value(), Some(12));
        assert_eq!(Cell::Number(12.9).stock_value(), Some(12));
        assert_eq!(Cell::Number(-3.9).stock_value(), Some(-3));
    }

    #[test]
    fn stock_value_text_degrades_to_zero() {
        assert_eq!(Cell::Text("n/a".into()).stock_value(), Some(0));
    }

    #[test]
    fn stock_value_empty_is_none() {
        assert_eq!(Cell::Empty.stock_value(), None);
    }

    #[test]
    fn display_round_trips_integers() {
        assert_eq!(Cell::Number(100.0).display(), "100");
        assert_eq!(Cell::Number(0.25).display(), "0.25");
        assert_eq!(Cell::Text("재고".into()).display(), "재고");
        assert_eq!(Cell::Empty.display(), "");
    }

    #[test]
    fn row_emptiness() {
        assert!(row_is_empty(&vec![]));
        assert!(row_is_empty(&vec![Cell::Empty, Cell::Empty]));
        assert!(!row_is_empty(&vec![Cell::Empty, Cell::Number(1.0)]));
    }
}
