#![no_main]
use libfuzzer_sys::fuzz_target;
use lolreg::registry::{normalize, SEPARATOR};

/// Fuzz path normalization.
///
/// Normalizing twice must give the same result, and the output never has
/// empty segments.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let once = normalize(s);
        assert_eq!(normalize(&once), once);
        if !once.is_empty() {
            assert!(once.split(SEPARATOR).all(|segment| !segment.is_empty()));
        }
    }
});
