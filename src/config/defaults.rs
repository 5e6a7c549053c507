//! Default values for lolreg configuration.

/// Data directory used when neither the CLI nor a config file names one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Root hives in tree display order.
pub const DEFAULT_HIVE_ORDER: &[&str] = &["HKLM", "HKCU", "HKCR", "HKU"];

/// Default hive order as owned strings.
pub fn default_hive_order() -> Vec<String> {
    DEFAULT_HIVE_ORDER.iter().map(|h| (*h).to_string()).collect()
}

/// Paths expanded when the tree view opens: the standard hives.
pub fn default_expanded() -> Vec<String> {
    default_hive_order()
}
