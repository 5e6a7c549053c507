//! Registry technique records.

use serde::{Deserialize, Serialize};

/// Base URL for MITRE ATT&CK technique pages.
pub const MITRE_TECHNIQUE_URL: &str = "https://attack.mitre.org/techniques/";

/// One documented registry technique, loaded from a single data file.
///
/// Everything except `name` defaults when absent from the source file. The
/// `id` is assigned by the loader from the file stem; a value present in the
/// file itself is overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier derived from the source file name
    #[serde(default)]
    pub id: String,
    /// Human-readable technique name
    pub name: String,
    /// What the key is used for and how it can be abused
    #[serde(default)]
    pub description: String,
    /// Category labels (persistence, defense_evasion, ...)
    #[serde(default)]
    pub tags: Vec<String>,
    /// MITRE ATT&CK technique ids, in source order
    #[serde(default)]
    pub mitre_ids: Vec<String>,
    /// Raw registry key paths as written in the source file
    #[serde(default)]
    pub keys: Vec<String>,
    /// External references
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Concrete abuse scenarios with code snippets
    #[serde(default)]
    pub use_cases: Vec<UseCase>,
}

impl Record {
    /// Create a record with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            mitre_ids: Vec::new(),
            keys: Vec::new(),
            resources: Vec::new(),
            use_cases: Vec::new(),
        }
    }

    /// Builder-style helper to attach raw key paths.
    #[must_use]
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style helper to attach tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Lightweight reference used by the tree and the key index.
    pub fn to_ref(&self) -> RecordRef {
        RecordRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    /// Whether the record carries the given tag (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// An external link attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub link: String,
}

/// A concrete abuse scenario for a registry key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: String,
}

/// The (id, name) pair that annotates tree nodes and index entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub id: String,
    pub name: String,
}

/// Link to the ATT&CK page of a technique id.
///
/// Sub-techniques use a path segment on the site: `T1547.001` becomes
/// `T1547/001/`.
pub fn mitre_url(technique_id: &str) -> String {
    format!(
        "{MITRE_TECHNIQUE_URL}{}/",
        technique_id.trim().replace('.', "/")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_yaml_defaults() {
        let record: Record = serde_yaml_ng::from_str("name: Run key\n").unwrap();
        assert_eq!(record.name, "Run key");
        assert!(record.id.is_empty());
        assert!(record.keys.is_empty());
        assert!(record.tags.is_empty());
        assert!(record.mitre_ids.is_empty());
        assert!(record.use_cases.is_empty());
        assert!(record.resources.is_empty());
    }

    #[test]
    fn test_name_is_required() {
        let result: Result<Record, _> = serde_yaml_ng::from_str("description: nameless\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_use_case_code_block() {
        let yaml = r#"
name: Run
use_cases:
  - title: Persist
    code: |
      reg add "HKCU\Software\Microsoft\Windows\CurrentVersion\Run" /v x /d y /f
"#;
        let record: Record = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(record.use_cases.len(), 1);
        assert!(record.use_cases[0].code.starts_with("reg add"));
        assert!(record.use_cases[0].description.is_empty());
    }

    #[test]
    fn test_mitre_url() {
        assert_eq!(
            mitre_url("T1547.001"),
            "https://attack.mitre.org/techniques/T1547/001/"
        );
        assert_eq!(mitre_url("T1112"), "https://attack.mitre.org/techniques/T1112/");
    }

    #[test]
    fn test_to_ref_and_tags() {
        let record = Record::new("run", "Run key").with_tags(["persistence"]);
        assert_eq!(
            record.to_ref(),
            RecordRef {
                id: "run".to_string(),
                name: "Run key".to_string()
            }
        );
        assert!(record.has_tag("persistence"));
        assert!(!record.has_tag("Persistence"));
    }
}
