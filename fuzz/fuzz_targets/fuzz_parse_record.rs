#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz record parsing and the views built from one record.
///
/// Feeds arbitrary UTF-8 to `parse_record_str`; whatever parses is pushed
/// through the tree and index builders.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(record) = lolreg::loader::parse_record_str("fuzz", s) {
            let records = [record];
            let tree = lolreg::registry::build_tree(&records);
            let _ = tree.all_paths();
            let _ = lolreg::registry::build_index(&records);
        }
    }
});
