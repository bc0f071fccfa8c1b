//! Subprocess wrapper around the `git` CLI rooted at a repository path.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{Error, Result};
use crate::stage::{PatternOutcome, StageOptions, StageReport};
use crate::status::StatusReport;

/// A git working tree addressed by its root directory.
///
/// Every method spawns a `git` child process with the root as its working
/// directory and blocks until it exits. Concurrent mutation of the same
/// working tree is rejected by git's own index lock; no additional locking
/// is performed here.
pub struct GitWorkspace {
    root: PathBuf,
}

impl GitWorkspace {
    /// Create a workspace for the given root.
    ///
    /// No validation happens here; the first repository-touching call
    /// reports a missing work tree as [`Error::NotARepository`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The working-tree root this workspace operates on.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command, returning the raw output regardless of exit
    /// status. Only a spawn failure is an error.
    fn run_git(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!(?args, root = %self.root.display(), "running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(Error::Io)
    }

    /// Run a git command and return trimmed stdout, treating a non-zero
    /// exit as [`Error::CommandFailed`] carrying stderr.
    fn git_command(&self, args: &[&str]) -> Result<String> {
        let output = self.run_git(args)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::CommandFailed {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// Capture and classify the current repository state.
    ///
    /// A non-zero exit from `git status` (not a repository, or git failed
    /// before producing output) is reported as [`Error::NotARepository`].
    pub fn status(&self) -> Result<StatusReport> {
        let output = self.run_git(&["status", "--porcelain"])?;
        if !output.status.success() {
            return Err(Error::NotARepository);
        }
        Ok(StatusReport::classify(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    /// Stage every change, then unstage paths matching the exclusion
    /// patterns.
    ///
    /// The sequence is fixed: a status probe (which doubles as the
    /// not-a-repository precondition check — staging is issued even when
    /// the tree is clean), one `git add .`, one `git reset -- <pattern>`
    /// per exclusion, and a final status capture whose staged bucket
    /// becomes the report.
    ///
    /// A failed `git add` aborts with no unstage calls. Failed unstages
    /// are recorded in [`StageReport::pattern_results`] and do not abort
    /// unless [`StageOptions::strict`] is set; in the lenient default the
    /// matching files simply stay staged.
    ///
    /// Untracked files staged by `git add .` and then matched by an
    /// exclusion pattern are unstaged again and reappear as untracked;
    /// there is no special-casing beyond git's own pathspec matching.
    pub fn stage_all(&self, options: &StageOptions) -> Result<StageReport> {
        let _pre = self.status()?;

        let add = self.run_git(&["add", "."])?;
        if !add.status.success() {
            return Err(Error::CommandFailed {
                message: format!(
                    "failed to stage changes: {}",
                    String::from_utf8_lossy(&add.stderr).trim()
                ),
            });
        }

        let mut pattern_results = Vec::with_capacity(options.exclusions.len());
        for pattern in &options.exclusions {
            let reset = self.run_git(&["reset", "--", pattern])?;
            if reset.status.success() {
                pattern_results.push(PatternOutcome {
                    pattern: pattern.clone(),
                    success: true,
                    detail: None,
                });
            } else {
                let message = String::from_utf8_lossy(&reset.stderr).trim().to_string();
                tracing::warn!(pattern = %pattern, %message, "unstage pattern failed");
                if options.strict {
                    return Err(Error::UnstageFailed {
                        pattern: pattern.clone(),
                        message,
                    });
                }
                pattern_results.push(PatternOutcome {
                    pattern: pattern.clone(),
                    success: false,
                    detail: Some(message),
                });
            }
        }

        let post = self.status()?;
        Ok(StageReport {
            staged_files: post.staged,
            excluded_patterns: options.exclusions.clone(),
            pattern_results,
        })
    }

    /// Record the staged changes as a commit with the given message.
    ///
    /// The resulting hash is read back with `rev-parse HEAD`; if that
    /// lookup fails the hash degrades to `"unknown"` rather than failing
    /// the already-created commit.
    pub fn commit(&self, message: &str) -> Result<Commit> {
        let output = self.run_git(&["commit", "-m", message])?;
        if !output.status.success() {
            return Err(Error::CommitFailed {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let hash = self
            .git_command(&["rev-parse", "HEAD"])
            .unwrap_or_else(|_| "unknown".to_string());

        Ok(Commit {
            hash,
            message: message.to_string(),
        })
    }

    /// Push a branch, configuring the upstream on first contact.
    ///
    /// Tries `git push --set-upstream <remote> <branch>` first; when that
    /// fails (e.g. the upstream is already configured differently), falls
    /// back to a plain `git push <remote> <branch>`. Both failing is
    /// [`Error::PushFailed`] with the stderr of the plain attempt.
    pub fn push(&self, remote: &str, branch: &str) -> Result<Push> {
        let upstream = self.run_git(&["push", "--set-upstream", remote, branch])?;
        if upstream.status.success() {
            return Ok(Push {
                message: format!("pushed to {remote}/{branch} and set upstream"),
                output: String::from_utf8_lossy(&upstream.stdout).to_string(),
            });
        }

        let plain = self.run_git(&["push", remote, branch])?;
        if plain.status.success() {
            Ok(Push {
                message: format!("pushed to {remote}/{branch}"),
                output: String::from_utf8_lossy(&plain.stdout).to_string(),
            })
        } else {
            Err(Error::PushFailed {
                message: String::from_utf8_lossy(&plain.stderr).trim().to_string(),
            })
        }
    }

    /// The currently checked-out branch name. Empty on a detached HEAD.
    pub fn current_branch(&self) -> Result<String> {
        self.git_command(&["branch", "--show-current"])
    }

    /// Subject line of the most recent commit, if any.
    pub fn last_commit_subject(&self) -> Option<String> {
        self.git_command(&["log", "-1", "--pretty=%s"])
            .ok()
            .filter(|subject| !subject.is_empty())
    }

    /// One-line entries for commits on `head` that are not on `base`.
    /// Returns an empty list when the range cannot be resolved.
    pub fn commits_between(&self, base: &str, head: &str) -> Vec<String> {
        self.git_command(&["log", &format!("{base}..{head}"), "--oneline"])
            .map(|out| {
                out.lines()
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A created commit: its hash and the message that was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub message: String,
}

/// A successful push: a human summary and the raw stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Push {
    pub message: String,
    pub output: String,
}
