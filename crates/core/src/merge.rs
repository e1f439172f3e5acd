// Catalog join: one ordered pass over the target rows, appending the
// matched stock count (0 on a miss) as a trailing column.

use crate::cell::{row_is_empty, Cell, Row};
use crate::config::{MergeConfig, TargetColumns};
use crate::error::MergeError;
use crate::model::{MergeMeta, MergeResult, MergeRun, MergeSummary, StockIndex, UnmatchedEntry};
use crate::reference::build_stock_index;

/// Key recorded for unmatched rows whose barcode cell was blank.
pub const MISSING_KEY: &str = "N/A";

/// Join target rows against the stock index.
///
/// Every non-empty row past the first `skip` rows yields exactly one
/// output row: its original cells plus one trailing stock cell. Row
/// order is preserved. A miss appends 0 and records the row in the
/// unmatched list.
pub fn merge_rows(
    rows: &[Row],
    skip: usize,
    columns: TargetColumns,
    index: &StockIndex,
) -> (Vec<Row>, MergeSummary, Vec<UnmatchedEntry>) {
    let mut merged = Vec::new();
    let mut summary = MergeSummary::default();
    let mut unmatched = Vec::new();

    for row in rows.iter().skip(skip) {
        if row_is_empty(row) {
            continue;
        }

        let key = row.get(columns.key).and_then(|c| c.key_text());

        let stock = match key.as_deref().and_then(|k| index.get(k)) {
            Some(stock) => {
                summary.matched += 1;
                stock
            }
            None => {
                summary.unmatched += 1;
                unmatched.push(UnmatchedEntry {
                    code: cell_display(row, columns.code),
                    name: cell_display(row, columns.name),
                    key: key.unwrap_or_else(|| MISSING_KEY.to_string()),
                });
                0
            }
        };

        let mut out = row.clone();
        out.push(Cell::Number(stock as f64));
        merged.push(out);
    }

    summary.total = summary.matched + summary.unmatched;
    (merged, summary, unmatched)
}

fn cell_display(row: &Row, col: usize) -> String {
    row.get(col).map(Cell::display).unwrap_or_default()
}

/// Run the full merge: build the index from the reference rows, join the
/// target rows, assemble the serializable result.
pub fn run(
    config: &MergeConfig,
    reference_rows: &[Row],
    target_rows: &[Row],
) -> Result<MergeRun, MergeError> {
    let reference_columns = config.reference.columns()?;
    let target_columns = config.target.columns()?;

    let index = build_stock_index(reference_rows, config.reference.skip_rows(), reference_columns);
    let (rows, summary, unmatched) =
        merge_rows(target_rows, config.target.skip_rows(), target_columns, &index);

    Ok(MergeRun {
        rows,
        result: MergeResult {
            meta: MergeMeta {
                config_name: config.name.clone(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
            },
            reference_keys: index.len(),
            summary,
            unmatched,
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: TargetColumns = TargetColumns { key: 2, code: 0, name: 1 };

    fn index(entries: &[(&str, i64)]) -> StockIndex {
        let mut index = StockIndex::default();
        for (key, stock) in entries {
            index.insert(key.to_string(), *stock);
        }
        index
    }

    fn product(code: &str, name: &str, barcode: &str) -> Row {
        vec![
            Cell::Text(code.into()),
            Cell::Text(name.into()),
            if barcode.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(barcode.into())
            },
        ]
    }

    #[test]
    fn matched_and_unmatched_split() {
        // Reference: A1 -> 10, A2 -> 20. Catalog: P1 on A1, P2 on A3.
        let idx = index(&[("A1", 10), ("A2", 20)]);
        let rows = vec![product("P1", "Widget", "A1"), product("P2", "Gadget", "A3")];

        let (merged, summary, unmatched) = merge_rows(&rows, 0, COLUMNS, &idx);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.unmatched, 1);

        assert_eq!(merged[0].last(), Some(&Cell::Number(10.0)));
        assert_eq!(merged[1].last(), Some(&Cell::Number(0.0)));

        assert_eq!(
            unmatched,
            vec![UnmatchedEntry {
                code: "P2".into(),
                name: "Gadget".into(),
                key: "A3".into(),
            }]
        );
    }

    #[test]
    fn every_row_gains_exactly_one_cell() {
        let idx = index(&[("A1", 10)]);
        let rows = vec![product("P1", "Widget", "A1"), product("P2", "Gadget", "")];
        let (merged, _, _) = merge_rows(&rows, 0, COLUMNS, &idx);
        for (input, output) in rows.iter().zip(&merged) {
            assert_eq!(output.len(), input.len() + 1);
            assert_eq!(&output[..input.len()], &input[..]);
        }
    }

    #[test]
    fn order_is_preserved() {
        let idx = index(&[]);
        let rows = vec![
            product("P3", "c", ""),
            product("P1", "a", ""),
            product("P2", "b", ""),
        ];
        let (merged, _, unmatched) = merge_rows(&rows, 0, COLUMNS, &idx);
        let codes: Vec<_> = merged.iter().map(|r| r[0].display()).collect();
        assert_eq!(codes, vec!["P3", "P1", "P2"]);
        let unmatched_codes: Vec<_> = unmatched.iter().map(|u| u.code.as_str()).collect();
        assert_eq!(unmatched_codes, vec!["P3", "P1", "P2"]);
    }

    #[test]
    fn counts_are_conserved() {
        let idx = index(&[("A1", 1), ("A2", 2)]);
        let rows = vec![
            product("P1", "a", "A1"),
            product("P2", "b", "A2"),
            product("P3", "c", "A9"),
            product("P4", "d", ""),
        ];
        let (merged, summary, unmatched) = merge_rows(&rows, 0, COLUMNS, &idx);
        assert_eq!(summary.matched + summary.unmatched, summary.total);
        assert_eq!(merged.len(), summary.total);
        assert_eq!(unmatched.len(), summary.unmatched);
    }

    #[test]
    fn blank_barcode_records_placeholder_key() {
        let idx = index(&[("A1", 10)]);
        let rows = vec![product("P9", "Thing", "")];
        let (merged, _, unmatched) = merge_rows(&rows, 0, COLUMNS, &idx);
        assert_eq!(merged[0].last(), Some(&Cell::Number(0.0)));
        assert_eq!(unmatched[0].key, MISSING_KEY);
    }

    #[test]
    fn whitespace_barcode_still_matches() {
        let idx = index(&[("A1", 10)]);
        let rows = vec![product("P1", "Widget", " A1 ")];
        let (_, summary, _) = merge_rows(&rows, 0, COLUMNS, &idx);
        assert_eq!(summary.matched, 1);
    }

    #[test]
    fn fully_empty_rows_are_dropped() {
        let idx = index(&[]);
        let rows = vec![
            product("P1", "a", ""),
            vec![Cell::Empty, Cell::Empty, Cell::Empty],
            vec![],
            product("P2", "b", ""),
        ];
        let (merged, summary, _) = merge_rows(&rows, 0, COLUMNS, &idx);
        assert_eq!(merged.len(), 2);
        assert_eq!(summary.total, 2);
    }

    #[test]
    fn skip_drops_header_rows() {
        let idx = index(&[]);
        let rows = vec![product("code", "name", "barcode"), product("P1", "a", "")];
        let (merged, _, _) = merge_rows(&rows, 1, COLUMNS, &idx);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0][0].display(), "P1");
    }

    #[test]
    fn short_row_counts_as_unmatched() {
        // A populated row that never reaches the barcode column.
        let idx = index(&[("A1", 10)]);
        let rows = vec![vec![Cell::Text("P1".into())]];
        let (merged, summary, unmatched) = merge_rows(&rows, 0, COLUMNS, &idx);
        assert_eq!(summary.unmatched, 1);
        assert_eq!(merged[0].len(), 2);
        assert_eq!(unmatched[0].key, MISSING_KEY);
        assert_eq!(unmatched[0].name, "");
    }

    #[test]
    fn run_wires_config_through() {
        let config = MergeConfig::from_toml(
            r#"
name = "test run"

[reference]
file = "stock.xlsx"
data_start_row = 1
key_column = "A"
value_column = "B"

[target]
file = "catalog.xlsx"
data_start_row = 1
key_column = "C"
code_column = "A"
name_column = "B"

[output]
file = "merged.xlsx"
"#,
        )
        .unwrap();

        let reference = vec![
            vec![Cell::Text("A1".into()), Cell::Number(10.0)],
            vec![Cell::Text("A2".into()), Cell::Number(20.0)],
        ];
        let target = vec![product("P1", "Widget", "A1"), product("P2", "Gadget", "A3")];

        let run = run(&config, &reference, &target).unwrap();
        assert_eq!(run.result.meta.config_name, "test run");
        assert_eq!(run.result.reference_keys, 2);
        assert_eq!(run.result.summary.matched, 1);
        assert_eq!(run.result.summary.unmatched, 1);
        assert_eq!(run.rows.len(), 2);
        assert_eq!(run.rows[0].last(), Some(&Cell::Number(10.0)));
    }
}
