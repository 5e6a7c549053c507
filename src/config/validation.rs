//! Configuration validation for lolreg.

use super::types::{AppConfig, DataConfig, OutputConfig, RegistryConfig, TreeConfig};
use crate::registry::{DEFAULT_HIVE_ALIASES, SEPARATOR};
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.data.validate());
        errors.extend(self.registry.validate());
        errors.extend(self.tree.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for DataConfig {
    fn validate(&self) -> Vec<ConfigError> {
        match self.dir {
            Some(ref dir) if dir.exists() && !dir.is_dir() => vec![ConfigError::new(
                "data.dir",
                format!("Not a directory: {}", dir.display()),
            )],
            _ => Vec::new(),
        }
    }
}

impl Validatable for RegistryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for name in &self.extra_segments {
            if let Some(message) = segment_problem(name) {
                errors.push(ConfigError::new(
                    "registry.extra_segments",
                    format!("'{name}': {message}"),
                ));
            }
        }

        // A short form that is itself an alias would make normalization
        // non-idempotent (A -> B on the first pass, B -> C on the second).
        let long_names: HashSet<String> = DEFAULT_HIVE_ALIASES
            .iter()
            .map(|(long, _)| long.to_uppercase())
            .chain(self.extra_hives.keys().map(|long| long.to_uppercase()))
            .collect();

        for (long, short) in &self.extra_hives {
            for (field, value) in [("key", long), ("value", short)] {
                if let Some(message) = segment_problem(value) {
                    errors.push(ConfigError::new(
                        format!("registry.extra_hives.{field}"),
                        format!("'{value}': {message}"),
                    ));
                }
            }
            if long_names.contains(&short.to_uppercase()) {
                errors.push(ConfigError::new(
                    "registry.extra_hives",
                    format!("Short form '{short}' for '{long}' is itself a long hive name"),
                ));
            }
        }

        errors
    }
}

impl Validatable for TreeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for hive in &self.hive_order {
            if let Some(message) = segment_problem(hive) {
                errors.push(ConfigError::new(
                    "tree.hive_order",
                    format!("'{hive}': {message}"),
                ));
            } else if !seen.insert(hive.to_uppercase()) {
                errors.push(ConfigError::new(
                    "tree.hive_order",
                    format!("Hive '{hive}' listed more than once"),
                ));
            }
        }

        for path in &self.expanded {
            if path.split(SEPARATOR).all(str::is_empty) {
                errors.push(ConfigError::new(
                    "tree.expanded",
                    "Empty path in expanded list",
                ));
            }
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

/// Why a configured name cannot be a single path segment, if it cannot.
fn segment_problem(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("must not be empty")
    } else if name.contains(SEPARATOR) {
        Some("must not contain a backslash")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_bad_extra_segments() {
        let config = RegistryConfig {
            extra_segments: vec![String::new(), r"SOFTWARE\Policies".to_string(), "Policies".to_string()],
            ..RegistryConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.field == "registry.extra_segments"));
    }

    #[test]
    fn test_hive_alias_chain_rejected() {
        let mut config = RegistryConfig::default();
        config
            .extra_hives
            .insert("HKEY_CURRENT_CONFIG".to_string(), "HKEY_USERS".to_string());
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("itself a long hive name"));

        let mut ok = RegistryConfig::default();
        ok.extra_hives
            .insert("HKEY_CURRENT_CONFIG".to_string(), "HKCC".to_string());
        assert!(ok.is_valid());
    }

    #[test]
    fn test_duplicate_hive_order() {
        let config = TreeConfig {
            hive_order: vec!["HKLM".to_string(), "hklm".to_string()],
            ..TreeConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("more than once"));
    }

    #[test]
    fn test_empty_expanded_path() {
        let config = TreeConfig {
            expanded: vec![r"\\".to_string()],
            ..TreeConfig::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_output_file_parent_missing() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/out.json")),
            ..OutputConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "output.file");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::new("tree.hive_order", "bad");
        assert_eq!(err.to_string(), "tree.hive_order: bad");
    }
}
