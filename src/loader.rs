//! Record loading from a directory of YAML files.
//!
//! One file holds one record. The record id is the file stem, so
//! `data/run-keys.yml` becomes `run-keys`. Files are read in file-name order,
//! which fixes the "first seen" order used by the key index.

use crate::error::{ErrorContext, LoadErrorKind, LolregError, OptionContext, Result};
use crate::model::{Record, RecordStore};
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// File extensions recognized as record files.
pub const RECORD_EXTENSIONS: &[&str] = &["yml", "yaml"];

static MITRE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^T\d{4}(\.\d{3})?$").expect("static regex"));

/// Whether `id` looks like an ATT&CK technique or sub-technique id.
pub fn is_valid_mitre_id(id: &str) -> bool {
    MITRE_ID.is_match(id)
}

/// Whether a path has a record file extension.
pub fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            RECORD_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Parse one record from YAML text and assign it `id`.
///
/// Malformed ATT&CK ids are logged, not rejected.
pub fn parse_record_str(id: &str, content: &str) -> Result<Record> {
    let mut record: Record =
        serde_yaml_ng::from_str(content).context(format!("record '{id}'"))?;

    if record.name.trim().is_empty() {
        return Err(LolregError::missing_field("name", format!("record '{id}'")));
    }

    for mitre_id in &record.mitre_ids {
        if !is_valid_mitre_id(mitre_id) {
            tracing::warn!("Record '{}' has malformed MITRE id '{}'", id, mitre_id);
        }
    }

    record.id = id.to_string();
    Ok(record)
}

/// Read and parse one record file; the id is the file stem.
pub fn load_record_file(path: &Path) -> Result<Record> {
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context_none(|| format!("file name {} is not valid UTF-8", path.display()))?;
    let content = std::fs::read_to_string(path).map_err(|e| LolregError::io(path, e))?;
    parse_record_str(id, &content).with_context(|| format!("parsing {}", path.display()))
}

/// Record files directly inside `dir`, sorted by file name.
pub fn discover_record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LolregError::load(
            "locating data directory",
            LoadErrorKind::NotADirectory(dir.to_path_buf()),
        ));
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| LolregError::io(dir, e))?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!("Cannot read entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|path| path.is_file() && is_record_file(path))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Load every record file in `dir` into a [`RecordStore`].
///
/// An empty directory gives an empty store. Two files with the same stem
/// (`run.yml` and `run.yaml`) are a [`LolregError::DuplicateId`].
pub fn load_records_dir(dir: &Path) -> Result<RecordStore> {
    let files = discover_record_files(dir)?;
    if files.is_empty() {
        tracing::warn!("No record files found in {}", dir.display());
    }

    let mut sources: HashMap<String, PathBuf> = HashMap::new();
    let mut records = Vec::with_capacity(files.len());
    for path in files {
        let record = load_record_file(&path)
            .with_context(|| format!("loading {}", dir.display()))?;
        if let Some(first) = sources.get(&record.id) {
            return Err(LolregError::DuplicateId {
                id: record.id,
                first: Some(first.clone()),
                second: Some(path),
            });
        }
        tracing::debug!("Loaded record '{}' from {}", record.id, path.display());
        sources.insert(record.id.clone(), path);
        records.push(record);
    }

    tracing::info!("Loaded {} records from {}", records.len(), dir.display());
    RecordStore::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_parse_record_assigns_id() {
        let record = parse_record_str("run", "id: ignored\nname: Run\n").unwrap();
        assert_eq!(record.id, "run");
    }

    #[test]
    fn test_parse_record_blank_name() {
        let result = parse_record_str("blank", "name: \"  \"\n");
        assert!(matches!(
            result,
            Err(LolregError::Load {
                source: LoadErrorKind::MissingField { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_parse_record_invalid_yaml() {
        let result = parse_record_str("bad", "name: [unclosed\n");
        assert!(matches!(
            result,
            Err(LolregError::Load {
                source: LoadErrorKind::InvalidYaml(_),
                ..
            })
        ));
    }

    #[test]
    fn test_parse_record_invalid_yaml_names_record() {
        let err = parse_record_str("bad", "name: [unclosed\n").unwrap_err();
        assert!(err.to_string().contains("record 'bad'"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn test_load_record_file_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/tmp/\xff\xfe.yml"));
        assert!(matches!(
            load_record_file(path),
            Err(LolregError::Validation(ref msg)) if msg.contains("not valid UTF-8")
        ));
    }

    #[test]
    fn test_mitre_id_shape() {
        assert!(is_valid_mitre_id("T1112"));
        assert!(is_valid_mitre_id("T1547.001"));
        assert!(!is_valid_mitre_id("t1112"));
        assert!(!is_valid_mitre_id("T1547.1"));
    }

    #[test]
    fn test_is_record_file() {
        assert!(is_record_file(Path::new("a.yml")));
        assert!(is_record_file(Path::new("a.YAML")));
        assert!(!is_record_file(Path::new("a.json")));
        assert!(!is_record_file(Path::new("README")));
    }

    #[test]
    fn test_load_dir_sorted_by_file_name() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.yml", "name: B\n");
        write(tmp.path(), "a.yaml", "name: A\nkeys:\n  - HKLM\\SYSTEM\n");
        write(tmp.path(), "notes.txt", "not a record");
        std::fs::create_dir(tmp.path().join("nested.yml")).unwrap();

        let store = load_records_dir(tmp.path()).unwrap();
        let ids: Vec<&str> = store.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.get("a").unwrap().keys, vec![r"HKLM\SYSTEM"]);
    }

    #[test]
    fn test_load_dir_duplicate_stem() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "run.yml", "name: Run\n");
        write(tmp.path(), "run.yaml", "name: Run again\n");

        match load_records_dir(tmp.path()) {
            Err(LolregError::DuplicateId { id, first, second }) => {
                assert_eq!(id, "run");
                assert!(first.is_some() && second.is_some());
            }
            other => panic!("Expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn test_load_dir_reports_bad_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "bad.yml", "description: no name\n");

        let err = load_records_dir(tmp.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bad.yml"), "{message}");
    }

    #[test]
    fn test_load_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let store = load_records_dir(tmp.path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_missing_dir() {
        let result = load_records_dir(Path::new("/nonexistent/lolreg-data"));
        assert!(matches!(
            result,
            Err(LolregError::Load {
                source: LoadErrorKind::NotADirectory(_),
                ..
            })
        ));
    }
}
