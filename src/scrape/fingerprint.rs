use std::collections::HashSet;

use crate::domain::itinerary::ItineraryRecord;
use crate::scrape::normalize::normalize;

/// Identity of an itinerary within a single render pass. Two rows with
/// the same normalized airline, normalized departure time, and price
/// (to the cent) are the same itinerary rendered twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    airline: String,
    departure_time: String,
    price_cents: u64,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn dedup_key(record: &ItineraryRecord) -> DedupKey {
    DedupKey {
        airline: normalize(&record.airline),
        departure_time: normalize(&record.departure_time),
        price_cents: (record.price.max(0.0) * 100.0).round() as u64,
    }
}

/// Collapse repeated observations to the first-seen instance, keeping
/// first-seen order. The seen-set is local to one render pass; a fresh
/// pass always starts empty.
pub fn dedupe(records: Vec<ItineraryRecord>) -> Vec<ItineraryRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(dedup_key(record)))
        .collect()
}
