//! Blocking `mvn` invocation.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output};

use serde::Serialize;

use crate::error::Result;

/// Outcome of a `mvn test` run. Always produced from the process exit,
/// whether the suite passed or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestRun {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Compilation health of a Maven project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStatus {
    pub is_maven_project: bool,
    pub compilation_success: bool,
    pub compilation_output: String,
}

/// Runs Maven goals against a project directory.
///
/// The program name is overridable so tests can substitute a stand-in
/// binary instead of requiring a Maven installation.
#[derive(Debug, Clone)]
pub struct MavenRunner {
    program: OsString,
}

impl Default for MavenRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MavenRunner {
    /// A runner invoking `mvn` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: OsString::from("mvn"),
        }
    }

    /// A runner invoking a specific program instead of `mvn`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run_goal(&self, project: &Path, goal: &str) -> Result<Output> {
        tracing::debug!(program = ?self.program, goal, project = %project.display(), "running maven");
        Ok(Command::new(&self.program)
            .arg(goal)
            .current_dir(project)
            .output()?)
    }

    /// Execute the test suite (`mvn test`) and report the outcome.
    pub fn run_tests(&self, project: &Path) -> Result<TestRun> {
        let output = self.run_goal(project, "test")?;
        Ok(TestRun {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Compile the project (`mvn compile`) and report overall status.
    ///
    /// `compilation_output` carries the build log only on failure; a
    /// passing compile collapses to a short confirmation.
    pub fn project_status(&self, project: &Path) -> Result<ProjectStatus> {
        let output = self.run_goal(project, "compile")?;
        let success = output.status.success();
        Ok(ProjectStatus {
            is_maven_project: project.join("pom.xml").exists(),
            compilation_success: success,
            compilation_output: if success {
                "Compilation successful".to_string()
            } else {
                String::from_utf8_lossy(&output.stdout).to_string()
            },
        })
    }
}
