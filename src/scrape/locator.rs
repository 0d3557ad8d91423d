use crate::domain::itinerary::{LegDirection, MatchCriteria, StopsClass};
use crate::scrape::extract;
use crate::scrape::normalize::normalize;

/// Price drift absorbed when re-finding a row: rendered totals wobble by
/// a dollar or so between passes (taxes re-rounded, fare refresh). Part
/// of the matching semantics, deliberately not configurable.
pub const PRICE_TOLERANCE: f64 = 2.0;

/// Find the previously chosen itinerary among freshly rendered blocks.
///
/// Each block is extracted into a candidate and put through four
/// independent checks; checks for fields the caller did not supply pass
/// vacuously. First block satisfying every supplied check wins, in
/// render order. `None` is an expected outcome: the row is no longer in
/// the result set (session drift, inventory change, or an earlier
/// mis-parse) and the caller must surface "zero results", not guess.
pub fn locate(blocks: &[String], criteria: &MatchCriteria, airlines: &[String]) -> Option<usize> {
    if !criteria.is_reliable() {
        tracing::warn!(
            ?criteria,
            "relocating with incomplete criteria; first match may be the wrong row"
        );
    }

    for (index, block) in blocks.iter().enumerate() {
        let Some(candidate) = extract::extract(block, airlines, LegDirection::Outbound, "") else {
            continue;
        };

        let airline_ok = criteria.airline.as_deref().is_none_or(|wanted| {
            let wanted = normalize(wanted);
            let seen = normalize(&candidate.airline);
            // Handles "JetBlue" vs "JetBlue Airways" in either direction
            !wanted.is_empty()
                && !seen.is_empty()
                && (seen.contains(&wanted) || wanted.contains(&seen))
        });

        let times_ok = match (&criteria.departure_time, &criteria.arrival_time) {
            (Some(dep), Some(arr)) => {
                normalize(dep) == normalize(&candidate.departure_time)
                    && normalize(arr) == normalize(&candidate.arrival_time)
            }
            (Some(dep), None) => normalize(dep) == normalize(&candidate.departure_time),
            (None, Some(arr)) => normalize(arr) == normalize(&candidate.arrival_time),
            (None, None) => true,
        };

        let stops_ok = match (&criteria.stops, candidate.stops) {
            (Some(wanted), seen) if seen != StopsClass::Unknown => {
                normalize(wanted) == normalize(&seen.to_string())
            }
            _ => true,
        };

        let price_ok = criteria
            .price
            .is_none_or(|wanted| (candidate.price - wanted).abs() < PRICE_TOLERANCE);

        if airline_ok && times_ok && stops_ok && price_ok {
            tracing::debug!(index, "located target itinerary");
            return Some(index);
        }
    }

    None
}
