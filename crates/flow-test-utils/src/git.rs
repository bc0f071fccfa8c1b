//! Git repository fixtures built on the `git` CLI.
//!
//! All fixtures shell out to the real `git` binary, matching how the
//! crates under test drive repositories in production.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run a git command in `path`, panicking with stderr on failure.
///
/// Exposed so tests can push a repository into arbitrary states (staging,
/// branching, conflicting merges) without duplicating plumbing.
pub fn git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("fixture: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "fixture: `git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Initialise a repository with deterministic identity config and one
/// commit on a `main` branch.
///
/// Use for: any test that needs real git state with history (status
/// classification, staging, committing).
pub fn init_repo_with_commit(path: &Path) {
    git(path, &["init"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test\n")
        .unwrap_or_else(|e| panic!("fixture: failed to write README.md: {e}"));

    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
    // Best-effort: older git versions may not support renaming the branch
    let _ = Command::new("git")
        .args(["branch", "-m", "main"])
        .current_dir(path)
        .output();
}

/// Write a file relative to the repository root, creating parent
/// directories as needed.
pub fn write_file(path: &Path, relative: &str, content: &str) {
    let target = path.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("fixture: failed to create {}: {e}", parent.display()));
    }
    fs::write(&target, content)
        .unwrap_or_else(|e| panic!("fixture: failed to write {}: {e}", target.display()));
}

/// Create a minimal `.git` directory structure **without** initialising a
/// real repository.
///
/// Use for: tests that need a `.git` marker to satisfy detection logic but
/// perform no real git operations.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir(path.join(".git"))
        .unwrap_or_else(|e| panic!("fixture: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fixture: failed to write HEAD: {e}"));
}
