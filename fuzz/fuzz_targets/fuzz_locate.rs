#![no_main]
use libfuzzer_sys::fuzz_target;

use flight_scout::domain::itinerary::MatchCriteria;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let blocks: Vec<String> = text.split('\x1e').map(str::to_string).collect();
        let airlines = vec!["JetBlue".to_string(), "Delta".to_string()];
        let criteria = MatchCriteria {
            airline: Some("JetBlue".into()),
            departure_time: Some("4:52 PM".into()),
            arrival_time: Some("8:07 PM".into()),
            price: Some(653.0),
            stops: Some("Nonstop".into()),
        };
        let _ = flight_scout::scrape::locator::locate(&blocks, &criteria, &airlines);
    }
});
