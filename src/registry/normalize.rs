//! Registry path normalization.
//!
//! A raw path such as `HKEY_LOCAL_MACHINE\Software\Microsoft\Windows` is
//! rewritten segment by segment:
//!
//! - empty segments (leading, trailing or doubled separators) are dropped;
//! - the first segment is the hive: long names are replaced by their short
//!   form and the result is upper-cased;
//! - every later segment found in the segment table takes the table's
//!   casing, anything else is kept verbatim.
//!
//! The rules only ever map a segment to a fixed point of the same rules, so
//! normalization is idempotent.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Registry path separator.
pub const SEPARATOR: char = '\\';

/// Long hive names and the short form they normalize to.
pub const DEFAULT_HIVE_ALIASES: &[(&str, &str)] = &[
    ("HKEY_LOCAL_MACHINE", "HKLM"),
    ("HKEY_CURRENT_USER", "HKCU"),
    ("HKEY_CLASSES_ROOT", "HKCR"),
    ("HKEY_USERS", "HKU"),
];

/// Well-known key names and their canonical casing.
pub const DEFAULT_SEGMENTS: &[&str] = &[
    "SOFTWARE",
    "SYSTEM",
    "SAM",
    "SECURITY",
    "Microsoft",
    "Windows",
    "CurrentVersion",
    "CurrentControlSet",
    "Run",
    "RunOnce",
    "Services",
    "Explorer",
    "Classes",
    "Enum",
    "Control",
    "Parameters",
    "Shell",
];

static STANDARD_TABLE: LazyLock<SegmentTable> = LazyLock::new(SegmentTable::default);

/// Canonical-casing rules applied by [`SegmentTable::normalize`].
///
/// The default table carries the four standard hive aliases and
/// [`DEFAULT_SEGMENTS`]; both can be extended from configuration.
#[derive(Debug, Clone)]
pub struct SegmentTable {
    /// Upper-cased long hive name → short form
    hives: HashMap<String, String>,
    /// Folded segment → canonical casing
    segments: HashMap<String, String>,
}

impl Default for SegmentTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (long, short) in DEFAULT_HIVE_ALIASES {
            table.add_hive_alias(long, short);
        }
        for segment in DEFAULT_SEGMENTS {
            table.add_segment(segment);
        }
        table
    }
}

impl SegmentTable {
    /// A table with no hive aliases and no known segments.
    pub fn empty() -> Self {
        Self {
            hives: HashMap::new(),
            segments: HashMap::new(),
        }
    }

    /// The shared default table.
    pub fn standard() -> &'static Self {
        &STANDARD_TABLE
    }

    /// Register (or re-case) a well-known segment name.
    pub fn add_segment(&mut self, canonical: &str) {
        self.segments
            .insert(canonical.to_lowercase(), canonical.to_string());
    }

    /// Register a long hive name and its short form.
    ///
    /// Every target stays a fixed point of the table: a short form that is
    /// itself a registered long name resolves to that name's target, and
    /// aliases that ended at `long` are re-pointed to the new target.
    pub fn add_hive_alias(&mut self, long: &str, short: &str) {
        let long = long.to_uppercase();
        let mut short = short.to_uppercase();
        if let Some(resolved) = self.hives.get(&short) {
            short = resolved.clone();
        }
        for target in self.hives.values_mut() {
            if *target == long {
                target.clone_from(&short);
            }
        }
        self.hives.insert(long, short);
    }

    /// Builder-style [`add_segment`](Self::add_segment) over many names.
    #[must_use]
    pub fn with_segments<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_segment(name.as_ref());
        }
        self
    }

    /// Builder-style [`add_hive_alias`](Self::add_hive_alias) over many pairs.
    #[must_use]
    pub fn with_hive_aliases<I, L, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (L, S)>,
        L: AsRef<str>,
        S: AsRef<str>,
    {
        for (long, short) in aliases {
            self.add_hive_alias(long.as_ref(), short.as_ref());
        }
        self
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Canonical form of a hive token.
    ///
    /// Aliases are matched on the upper-cased token, so the output of this
    /// function never matches an alias it did not already resolve.
    pub fn canonical_hive(&self, hive: &str) -> String {
        let upper = hive.to_uppercase();
        match self.hives.get(&upper) {
            Some(short) => short.clone(),
            None => upper,
        }
    }

    /// Canonical form of a non-hive segment; unknown names pass through.
    pub fn canonical_segment(&self, segment: &str) -> String {
        self.segments
            .get(&segment.to_lowercase())
            .cloned()
            .unwrap_or_else(|| segment.to_string())
    }

    /// Normalize a raw path into its canonical segments.
    ///
    /// Returns an empty vector when the path has no non-empty segment.
    pub fn segments(&self, raw: &str) -> Vec<String> {
        raw.split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .enumerate()
            .map(|(position, segment)| {
                if position == 0 {
                    self.canonical_hive(segment)
                } else {
                    self.canonical_segment(segment)
                }
            })
            .collect()
    }

    /// Normalize a raw path; the empty path normalizes to `""`.
    pub fn normalize(&self, raw: &str) -> String {
        self.segments(raw).join(&SEPARATOR.to_string())
    }
}

/// Normalize a raw path with the standard table.
pub fn normalize(raw: &str) -> String {
    SegmentTable::standard().normalize(raw)
}

/// First segment of an already normalized path.
pub fn hive_of(path: &str) -> &str {
    path.split(SEPARATOR).next().unwrap_or_default()
}
