//! `template` and `config` command handlers.

use crate::config::{generate_full_example_config, generate_json_schema, AppConfig};
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use crate::template::{contribution_template, validate_template};
use anyhow::{Context, Result};

/// Run the `template` command: print the YAML skeleton for a new record.
///
/// The template is always emitted as YAML; the output format does not apply.
pub fn run_template(config: &AppConfig, quiet: bool) -> Result<i32> {
    validate_template().context("built-in contribution template does not parse")?;

    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(contribution_template(), &target, quiet)?;
    Ok(exit_codes::SUCCESS)
}

/// What the `config` command prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigOutput {
    /// The effective configuration after file and CLI merging
    #[default]
    Effective,
    /// A commented example file
    Example,
    /// JSON schema of the file format
    Schema,
}

/// Run the `config` command.
pub fn run_config(config: &AppConfig, what: ConfigOutput, quiet: bool) -> Result<i32> {
    let content = match what {
        ConfigOutput::Effective => serde_yaml_ng::to_string(config)
            .context("failed to serialize effective config")?,
        ConfigOutput::Example => generate_full_example_config(),
        ConfigOutput::Schema => generate_json_schema(),
    };

    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&content, &target, quiet)?;
    Ok(exit_codes::SUCCESS)
}
