//! Collapse a per-category expense breakdown into a bounded, display-ready
//! set: the top four categories by share plus one aggregated "Other" bucket.
//!
//! The output is always renderable: empty input yields a single grey
//! "No Data" placeholder instead of an empty series.

use crate::analytics::BreakdownEntry;

/// Entries kept verbatim before the remainder collapses into "Other".
pub const MAX_NAMED_ENTRIES: usize = 4;

/// Fixed color for the aggregated "Other" bucket, distinct from any
/// server-assigned category color.
pub const OTHER_COLOR: &str = "#9CA3AF";

/// Neutral color for the empty-data placeholder.
pub const NO_DATA_COLOR: &str = "#D1D5DB";

/// The placeholder shown when a period has no expense data at all.
pub fn no_data_entry() -> BreakdownEntry {
    BreakdownEntry {
        name: "No Data".to_string(),
        value: 100.0,
        amount: 0.0,
        color: NO_DATA_COLOR.to_string(),
    }
}

/// Bound a raw breakdown to at most five entries.
///
/// - empty input: one "No Data" placeholder;
/// - up to four entries: passed through unchanged, original order kept;
/// - more: stable sort descending by `value`, top four verbatim, remainder
///   summed into "Other". Ties keep input order.
///
/// The value total is conserved, so percentages still sum to 100.
pub fn collapse(entries: &[BreakdownEntry]) -> Vec<BreakdownEntry> {
    if entries.is_empty() {
        return vec![no_data_entry()];
    }
    if entries.len() <= MAX_NAMED_ENTRIES {
        return entries.to_vec();
    }

    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));

    let rest = sorted.split_off(MAX_NAMED_ENTRIES);
    let other_value: f64 = rest.iter().map(|e| e.value).sum();
    let other_amount: f64 = rest.iter().map(|e| e.amount).sum();

    sorted.push(BreakdownEntry {
        name: "Other".to_string(),
        value: other_value,
        amount: other_amount,
        color: OTHER_COLOR.to_string(),
    });
    sorted
}
