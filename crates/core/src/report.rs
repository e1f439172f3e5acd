// Post-merge report rendering. Pure string building; the CLI decides
// where the text goes.

use crate::merge::MISSING_KEY;
use crate::model::MergeResult;

/// Display width for product names in the unmatched listing.
const NAME_WIDTH: usize = 40;

/// Render the merge report: a statistics block, then (when present) the
/// unmatched-product listing. Output is deterministic for a given
/// result, so runs can be diffed.
pub fn render(result: &MergeResult) -> String {
    let mut lines: Vec<String> = Vec::new();
    let summary = &result.summary;

    lines.push("=".repeat(50));
    lines.push("Statistics:".to_string());
    lines.push(format!("   - Total products: {}", summary.total));
    lines.push(format!("   - Matched: {}", summary.matched));
    lines.push(format!("   - Unmatched: {}", summary.unmatched));
    lines.push("=".repeat(50));

    if !result.unmatched.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "[UNMATCHED PRODUCTS - {} items]",
            result.unmatched.len()
        ));
        lines.push("=".repeat(80));
        for (idx, entry) in result.unmatched.iter().enumerate() {
            let name = if entry.name.is_empty() {
                MISSING_KEY.to_string()
            } else {
                truncate(&entry.name, NAME_WIDTH)
            };
            lines.push(format!(
                "{:>3}. [{}] {:<width$} | Barcode: {}",
                idx + 1,
                entry.code,
                name,
                entry.key,
                width = NAME_WIDTH,
            ));
        }
        lines.push("=".repeat(80));
    }

    lines.join("\n")
}

/// Truncate to at most `width` characters. Char-based, not byte-based:
/// product names are frequently Korean.
fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MergeMeta, MergeSummary, UnmatchedEntry};

    fn result(summary: MergeSummary, unmatched: Vec<UnmatchedEntry>) -> MergeResult {
        MergeResult {
            meta: MergeMeta {
                config_name: "test".into(),
                engine_version: "0.0.0".into(),
                run_at: "2026-01-01T00:00:00Z".into(),
            },
            reference_keys: 0,
            summary,
            unmatched,
        }
    }

    #[test]
    fn clean_run_has_no_listing() {
        let text = render(&result(
            MergeSummary { total: 3, matched: 3, unmatched: 0 },
            vec![],
        ));
        assert!(text.contains("   - Total products: 3"));
        assert!(text.contains("   - Matched: 3"));
        assert!(text.contains("   - Unmatched: 0"));
        assert!(!text.contains("UNMATCHED PRODUCTS"));
    }

    #[test]
    fn listing_is_indexed_and_padded() {
        let text = render(&result(
            MergeSummary { total: 2, matched: 0, unmatched: 2 },
            vec![
                UnmatchedEntry { code: "P2".into(), name: "Gadget".into(), key: "A3".into() },
                UnmatchedEntry { code: "P9".into(), name: "".into(), key: "N/A".into() },
            ],
        ));
        assert!(text.contains("[UNMATCHED PRODUCTS - 2 items]"));
        assert!(text.contains(&format!("  1. [P2] {:<40} | Barcode: A3", "Gadget")));
        assert!(text.contains(&format!("  2. [P9] {:<40} | Barcode: N/A", "N/A")));
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "x".repeat(60);
        let text = render(&result(
            MergeSummary { total: 1, matched: 0, unmatched: 1 },
            vec![UnmatchedEntry { code: "P1".into(), name: long, key: "B1".into() }],
        ));
        assert!(text.contains(&"x".repeat(40)));
        assert!(!text.contains(&"x".repeat(41)));
    }

    #[test]
    fn korean_names_truncate_by_char() {
        let name = "상품".repeat(30); // 60 chars
        let text = render(&result(
            MergeSummary { total: 1, matched: 0, unmatched: 1 },
            vec![UnmatchedEntry { code: "P1".into(), name, key: "B1".into() }],
        ));
        assert!(text.contains(&"상품".repeat(20)));
        assert!(!text.contains(&"상품".repeat(21)));
    }

    #[test]
    fn rendering_is_deterministic() {
        let r = result(
            MergeSummary { total: 1, matched: 0, unmatched: 1 },
            vec![UnmatchedEntry { code: "P1".into(), name: "a".into(), key: "K".into() }],
        );
        assert_eq!(render(&r), render(&r));
    }
}
