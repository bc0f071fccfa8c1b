//! Staging options and reports for the stage-all-with-exclusions operation.
//!
//! The operation itself lives on [`crate::GitWorkspace::stage_all`]; this
//! module holds the pattern set and the result types.

use serde::Serialize;

use crate::status::FileChange;

/// Build-artifact and tool-noise patterns excluded from staging by default.
///
/// Covers compiled JVM artifacts, common build output directories, IDE
/// project files, logs, and Python bytecode/venv clutter.
pub const DEFAULT_EXCLUDE_PATTERNS: [&str; 23] = [
    "*.class",
    "*.jar",
    "*.war",
    "*.ear",
    "target/",
    "build/",
    "*.iml",
    "*.ipr",
    "*.iws",
    ".idea/",
    "*.log",
    "logs/",
    "node_modules/",
    "dist/",
    "out/",
    ".gradle/",
    ".venv/",
    "__pycache__/",
    "*.pyc",
    "*.pyo",
    "*.pyd",
    ".Python",
    "env/",
];

/// The default exclusion set as owned strings.
pub fn default_exclusions() -> Vec<String> {
    DEFAULT_EXCLUDE_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Options for [`crate::GitWorkspace::stage_all`].
#[derive(Debug, Clone)]
pub struct StageOptions {
    /// Glob-style patterns to unstage after the stage-all pass.
    pub exclusions: Vec<String>,
    /// When true, the first failed unstage aborts the operation. The
    /// default is lenient: failures are recorded per pattern and the
    /// matching files stay staged.
    pub strict: bool,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            exclusions: default_exclusions(),
            strict: false,
        }
    }
}

impl StageOptions {
    /// Lenient options with a caller-supplied exclusion set.
    pub fn with_exclusions(exclusions: Vec<String>) -> Self {
        Self {
            exclusions,
            strict: false,
        }
    }
}

/// Outcome of one `git reset -- <pattern>` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternOutcome {
    pub pattern: String,
    pub success: bool,
    /// Stderr text when the reset failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Result of a stage-all-with-exclusions run.
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    /// The staged bucket re-read after exclusions were applied.
    pub staged_files: Vec<FileChange>,
    /// The exclusion set that was applied, in order.
    pub excluded_patterns: Vec<String>,
    /// Per-pattern unstage outcomes, in pattern order.
    pub pattern_results: Vec<PatternOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_options_are_lenient_with_builtin_patterns() {
        let options = StageOptions::default();
        assert!(!options.strict);
        assert_eq!(options.exclusions.len(), DEFAULT_EXCLUDE_PATTERNS.len());
        assert_eq!(options.exclusions[0], "*.class");
    }

    #[test]
    fn builtin_patterns_cover_jvm_and_tooling_noise() {
        for expected in ["*.jar", "target/", "node_modules/", "__pycache__/", "*.log"] {
            assert!(
                DEFAULT_EXCLUDE_PATTERNS.contains(&expected),
                "missing {expected}"
            );
        }
    }

    #[test]
    fn with_exclusions_keeps_caller_patterns_verbatim() {
        let options = StageOptions::with_exclusions(vec!["*.tmp".to_string()]);
        assert_eq!(options.exclusions, vec!["*.tmp".to_string()]);
        assert!(!options.strict);
    }

    #[test]
    fn pattern_outcome_omits_detail_when_successful() {
        let outcome = PatternOutcome {
            pattern: "*.log".to_string(),
            success: true,
            detail: None,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(!json.contains("detail"));
    }
}
