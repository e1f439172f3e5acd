// Reference-sheet loading: one pass over the stock-count rows building
// the barcode -> stock index.

use crate::cell::Row;
use crate::config::ReferenceColumns;
use crate::model::StockIndex;

/// Build the stock index from raw sheet rows.
///
/// `skip` is the number of leading header rows to drop. A row contributes
/// an entry only when its key cell is non-blank and its value cell is
/// populated; rows too short to reach either column are skipped. Text in
/// the value cell degrades to 0, and duplicate keys keep the last row.
pub fn build_stock_index(rows: &[Row], skip: usize, columns: ReferenceColumns) -> StockIndex {
    let mut index = StockIndex::default();

    for row in rows.iter().skip(skip) {
        let key = match row.get(columns.key).and_then(|c| c.key_text()) {
            Some(key) => key,
            None => continue,
        };
        let stock = match row.get(columns.value).and_then(|c| c.stock_value()) {
            Some(stock) => stock,
            None => continue,
        };
        index.insert(key, stock);
    }

    index
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
