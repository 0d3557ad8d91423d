#![no_main]
use libfuzzer_sys::fuzz_target;

use flight_scout::domain::itinerary::LegDirection;

fuzz_target!(|data: &[u8]| {
    if let Ok(block) = std::str::from_utf8(data) {
        let airlines = vec!["JetBlue".to_string(), "Delta".to_string()];
        let _ = flight_scout::scrape::extract::extract(
            block,
            &airlines,
            LegDirection::Outbound,
            "https://travel/results",
        );
    }
});
