#![no_main]
use libfuzzer_sys::fuzz_target;

use flight_scout::scrape::normalize::normalize;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
});
