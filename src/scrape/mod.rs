pub mod extract;
pub mod fingerprint;
pub mod locator;
pub mod normalize;

use crate::domain::itinerary::{ItineraryRecord, LegDirection};

/// Turn one render pass into a deduplicated, ordered record sequence.
///
/// Blocks that fail extraction (no price marker) are skipped silently —
/// result pages interleave itinerary rows with banners and sort
/// controls, and those are not errors. Every surviving record is tagged
/// with the leg direction and the pass's continuation reference.
pub fn scrape_records(
    blocks: &[String],
    leg: LegDirection,
    continuation: &str,
    airlines: &[String],
) -> Vec<ItineraryRecord> {
    let records: Vec<ItineraryRecord> = blocks
        .iter()
        .filter_map(|block| {
            let record = extract::extract(block, airlines, leg, continuation);
            if record.is_none() {
                tracing::debug!(len = block.len(), "skipping block without price marker");
            }
            record
        })
        .collect();

    let total = records.len();
    let deduped = fingerprint::dedupe(records);
    if deduped.len() < total {
        tracing::debug!(
            collapsed = total - deduped.len(),
            "collapsed duplicate rows in render pass"
        );
    }
    deduped
}
