use std::collections::HashMap;

use serde::Serialize;

use crate::cell::Row;

// ---------------------------------------------------------------------------
// Stock index
// ---------------------------------------------------------------------------

/// Barcode -> counted stock, built from the reference sheet.
///
/// Insertion is last-write-wins: when a barcode appears on several count
/// rows, the final row is the one that sticks.
#[derive(Debug, Default)]
pub struct StockIndex {
    map: HashMap<String, i64>,
}

impl StockIndex {
    pub fn insert(&mut self, key: String, stock: i64) {
        self.map.insert(key, stock);
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.map.get(key).copied()
    }

    /// Number of distinct keys. Reported after loading so a count far
    /// below the sheet's row count is visible early.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Merge results
// ---------------------------------------------------------------------------

/// A catalog row whose barcode had no entry in the stock index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedEntry {
    pub code: String,
    pub name: String,
    /// The row's barcode, or "N/A" when the barcode cell was blank.
    pub key: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeSummary {
    /// Catalog rows processed (matched + unmatched).
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Serializable outcome of one merge run.
#[derive(Debug, Clone, Serialize)]
pub struct MergeResult {
    pub meta: MergeMeta,
    /// Distinct keys loaded from the reference sheet.
    pub reference_keys: usize,
    pub summary: MergeSummary,
    pub unmatched: Vec<UnmatchedEntry>,
}

/// Full engine output: merged rows for the sink plus the result summary.
#[derive(Debug)]
pub struct MergeRun {
    pub rows: Vec<Row>,
    pub result: MergeResult,
}
