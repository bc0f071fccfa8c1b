//! Report location, parsing, and recommendations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Where a Maven build writes the JaCoCo XML report, relative to the
/// project root.
pub const DEFAULT_REPORT_RELATIVE_PATH: &str = "target/site/jacoco/jacoco.xml";

/// The JaCoCo report path for a project directory.
pub fn default_report_path(project: &Path) -> PathBuf {
    project.join(DEFAULT_REPORT_RELATIVE_PATH)
}

/// Coverage metrics extracted from a report.
///
/// The field set is the stable contract; extraction of the actual counter
/// values is not wired up, so every parse currently yields the zeroed
/// structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageData {
    pub line_coverage: f64,
    pub branch_coverage: f64,
    pub uncovered_methods: Vec<String>,
    pub low_coverage_classes: Vec<String>,
}

/// Parse a JaCoCo XML report.
///
/// A missing file is [`Error::ReportNotFound`]; unreadable or visibly
/// non-XML content is [`Error::InvalidReport`]. Anything that passes those
/// checks yields the default [`CoverageData`].
pub fn parse_report(path: &Path) -> Result<CoverageData> {
    if !path.exists() {
        return Err(Error::ReportNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    if !content.trim_start().starts_with('<') {
        return Err(Error::InvalidReport {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), "coverage report read; counter extraction not implemented");
    Ok(CoverageData::default())
}

/// Recommendations derived from coverage data.
///
/// Follows the same contract-first shape as [`parse_report`]: the list is
/// currently always empty.
pub fn recommendations(_data: &CoverageData) -> Vec<String> {
    Vec::new()
}
