//! Contribution template for new records.

use crate::error::Result;
use crate::loader::parse_record_str;
use crate::model::Record;

/// YAML skeleton for a new record file.
///
/// Save it as `data/<id>.yml`; the file stem becomes the record id.
pub const CONTRIBUTION_TEMPLATE: &str = r#"name: "Name of the Registry Key/Technique"
description: "A brief description of what this key is used for and how it can be abused."
tags:
  - persistence
  - privilege_escalation
  - defense_evasion
mitre_ids:
  - T1547.001
keys:
  - "HKCU\\Software\\Microsoft\\Windows\\CurrentVersion\\Run"
resources:
  - link: "https://learn.microsoft.com/en-us/windows/win32/setupapi/run-and-runonce-registry-keys"
use_cases:
  - title: "Technique Title"
    description: "Description of the specific malicious use case."
    code: |
      reg add "HKCU\Software\..." /v "MaliciousValue" /d "C:\Path\To\Payload.exe" /f
"#;

/// The template text.
pub fn contribution_template() -> &'static str {
    CONTRIBUTION_TEMPLATE
}

/// Parse the template as a record, proving it loads.
pub fn validate_template() -> Result<Record> {
    parse_record_str("template", CONTRIBUTION_TEMPLATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let record = validate_template().unwrap();
        assert_eq!(record.id, "template");
        assert_eq!(record.tags.len(), 3);
        assert_eq!(record.mitre_ids, vec!["T1547.001"]);
        assert_eq!(
            record.keys,
            vec![r"HKCU\Software\Microsoft\Windows\CurrentVersion\Run"]
        );
        assert_eq!(record.resources.len(), 1);
        assert!(record.use_cases[0].code.contains("reg add"));
    }
}
