//! Render plan for the search view.
//!
//! `render_plan` is a pure function of a snapshot. The blocks are not
//! mutually exclusive; they are emitted in display order and the UI draws
//! each one beneath the search bar.

use crate::api::protocol::VariantRecord;
use crate::search::state::SearchState;

/// Table header, in column order.
pub const COLUMNS: [&str; 5] = ["Sample ID", "Gene", "Variant", "VAF", "Tumor Type"];

pub const LOADING_TEXT: &str = "Loading…";
pub const NO_RESULTS_TEXT: &str = "No results to display";

/// One visible piece of the body below the search bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewBlock<'a> {
    Loading,
    Error(&'a str),
    RequestId(&'a str),
    /// Count line followed by the results table
    Results(&'a [VariantRecord]),
    NoResults,
}

/// Derive the body blocks for a snapshot.
pub fn render_plan(state: &SearchState) -> Vec<ViewBlock<'_>> {
    let mut blocks = Vec::new();

    if state.is_loading {
        blocks.push(ViewBlock::Loading);
    }
    if let Some(message) = &state.error_message {
        blocks.push(ViewBlock::Error(message));
    }
    if let Some(request_id) = &state.request_id {
        blocks.push(ViewBlock::RequestId(request_id));
    }
    if !state.results.is_empty() {
        blocks.push(ViewBlock::Results(&state.results));
    }
    if state.results.is_empty() && !state.is_loading && state.error_message.is_none() {
        blocks.push(ViewBlock::NoResults);
    }

    blocks
}

/// Count line shown above the table.
pub fn count_line(count: usize) -> String {
    format!("{} samples found", count)
}

/// Table body as display strings, one row per record in received order.
pub fn table_rows(records: &[VariantRecord]) -> Vec<[String; 5]> {
    records
        .iter()
        .map(|record| record.cells().map(|cell| cell.to_string()))
        .collect()
}
