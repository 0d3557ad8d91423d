use std::sync::LazyLock;

use regex::Regex;

use crate::domain::itinerary::{ItineraryRecord, LegDirection, StopsClass};

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\s?(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)").expect("valid price regex")
});

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}:\d{2}\s?[AP]M\b").expect("valid clock regex"));

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}\s?hr(?:s)?(?:\s?\d{1,2}\s?min)?\b|\b\d{1,3}\s?min\b")
        .expect("valid duration regex")
});

static STOPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)\s?stops?\b").expect("valid stops regex"));

/// Parse one opaque render block into a structured record.
///
/// Returns `None` when the block carries no `$` price marker — a row
/// without a price is not an itinerary (sponsored banners, date strips,
/// cookie notices). All five sub-extractions are independent and
/// best-effort: a missing field gets its documented default and never
/// aborts the others.
pub fn extract(
    block: &str,
    airlines: &[String],
    leg: LegDirection,
    continuation: &str,
) -> Option<ItineraryRecord> {
    if !block.contains('$') {
        return None;
    }

    let (departure_time, arrival_time) = extract_times(block);

    Some(ItineraryRecord {
        airline: extract_airline(block, airlines),
        price: extract_price(block),
        departure_time,
        arrival_time,
        duration: extract_duration(block),
        stops: extract_stops(block),
        continuation: continuation.to_string(),
        leg,
    })
}

/// Scan the known-airline vocabulary in order; first substring match
/// wins. Rendered cards are too inconsistent for structural parsing, so
/// a closed vocabulary beats guessing at line layout. Falls back to the
/// first non-empty line of the block.
fn extract_airline(block: &str, airlines: &[String]) -> String {
    let lower = block.to_lowercase();
    for name in airlines {
        if lower.contains(&name.to_lowercase()) {
            return name.clone();
        }
    }

    block
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Unknown")
        .to_string()
}

/// First `$`-prefixed numeral group, thousands separators stripped.
/// Unparseable prices become 0.0 ("unparsed", not "free").
fn extract_price(block: &str) -> f64 {
    PRICE_RE
        .captures(block)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// All clock-pattern substrings in order of appearance: first is taken
/// as departure, last as arrival. This assumes the row lists times
/// chronologically — a heuristic, not a guarantee; blocks with more
/// than two clocks (layover times) mis-attribute silently. A single
/// clock is not enough to infer direction, so both fields stay Unknown.
fn extract_times(block: &str) -> (String, String) {
    let clocks: Vec<&str> = CLOCK_RE.find_iter(block).map(|m| m.as_str()).collect();
    match clocks.as_slice() {
        [] | [_] => ("Unknown".into(), "Unknown".into()),
        [first, .., last] => ((*first).to_string(), (*last).to_string()),
    }
}

fn extract_duration(block: &str) -> String {
    DURATION_RE
        .find(block)
        .map_or_else(|| "Unknown".to_string(), |m| m.as_str().to_string())
}

fn extract_stops(block: &str) -> StopsClass {
    if block.to_lowercase().contains("nonstop") {
        return StopsClass::Nonstop;
    }
    STOPS_RE
        .captures(block)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map_or(StopsClass::Unknown, StopsClass::Stops)
}
