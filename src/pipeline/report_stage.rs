//! Report output stage.
//!
//! Resolves the output format, renders through the matching reporter and
//! writes the result to stdout or a file.

use crate::config::OutputConfig;
use crate::reports::{create_reporter, ReportError, ReportGenerator};
use anyhow::Result;

use super::{auto_detect_format, write_output, OutputTarget, PipelineError};

/// Render with the reporter for `output` and write the result.
///
/// `render` receives the reporter chosen for the resolved format.
pub fn output_report<F>(output: &OutputConfig, quiet: bool, render: F) -> Result<()>
where
    F: FnOnce(&dyn ReportGenerator) -> Result<String, ReportError>,
{
    let target = OutputTarget::from_option(output.file.clone());
    let format = auto_detect_format(output.format, &target);
    tracing::debug!("Rendering {} report", format);

    let reporter = create_reporter(format);
    let report = render(reporter.as_ref()).map_err(|e| PipelineError::ReportFailed {
        source: e.into(),
    })?;

    write_output(&report, &target, quiet)
}
