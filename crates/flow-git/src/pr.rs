//! Pull-request creation through the GitHub CLI.
//!
//! `gh pr create` is the only hard dependency on GitHub here, and it is a
//! soft one: when the binary is missing or exits non-zero, the operation
//! degrades to manual instructions instead of failing.

use std::process::Command;

use crate::error::Result;
use crate::workspace::GitWorkspace;

/// Outcome of a pull-request creation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequest {
    /// `gh` accepted the request and printed the PR URL.
    Created {
        url: String,
        branch: String,
        base: String,
    },
    /// `gh` was unavailable or refused; the caller gets instructions plus
    /// everything needed to open the PR by hand.
    Manual {
        instructions: String,
        title: String,
        body: String,
        branch: String,
        base: String,
    },
}

impl GitWorkspace {
    /// Create a pull request from the current branch against `base`.
    ///
    /// The only failure mode is not being able to determine the current
    /// branch; everything downstream degrades to [`PullRequest::Manual`].
    pub fn create_pull_request(&self, base: &str, title: &str, body: &str) -> Result<PullRequest> {
        let branch = self.current_branch()?;

        let outcome = Command::new("gh")
            .args(["pr", "create", "--base", base, "--title", title, "--body", body])
            .current_dir(self.root())
            .output();

        match outcome {
            Ok(output) if output.status.success() => Ok(PullRequest::Created {
                url: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                branch,
                base: base.to_string(),
            }),
            Ok(output) => {
                tracing::warn!(
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "gh pr create failed, falling back to manual instructions"
                );
                Ok(Self::manual_fallback(base, title, body, branch))
            }
            Err(err) => {
                tracing::warn!(error = %err, "gh not available, falling back to manual instructions");
                Ok(Self::manual_fallback(base, title, body, branch))
            }
        }
    }

    fn manual_fallback(base: &str, title: &str, body: &str, branch: String) -> PullRequest {
        PullRequest::Manual {
            instructions: format!("Please create PR manually from {branch} to {base}"),
            title: title.to_string(),
            body: body.to_string(),
            branch,
            base: base.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_fallback_carries_everything_needed() {
        let pr = GitWorkspace::manual_fallback("main", "Title", "Body", "feature".to_string());
        match pr {
            PullRequest::Manual {
                instructions,
                title,
                body,
                branch,
                base,
            } => {
                assert_eq!(instructions, "Please create PR manually from feature to main");
                assert_eq!(title, "Title");
                assert_eq!(body, "Body");
                assert_eq!(branch, "feature");
                assert_eq!(base, "main");
            }
            PullRequest::Created { .. } => panic!("expected manual fallback"),
        }
    }
}
