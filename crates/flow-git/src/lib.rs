//! Git status classification and staging orchestration for Devflow
//!
//! This crate wraps the `git` and `gh` command-line tools with typed
//! operations used by the MCP tool server:
//!
//! - [`status`] — parse `git status --porcelain` output into staged,
//!   unstaged, untracked, and conflict buckets
//! - [`stage`] — stage-all-then-unstage-excluded filtering driven by glob
//!   patterns, with per-pattern outcome reporting
//! - [`workspace`] — the [`GitWorkspace`] subprocess wrapper (status,
//!   commit, push, log plumbing)
//! - [`pr`] — pull-request creation via the GitHub CLI with a manual
//!   fallback when `gh` is unavailable
//!
//! Every operation blocks until the spawned process exits. There is no
//! locking beyond git's own index lock.

pub mod error;
pub mod pr;
pub mod stage;
pub mod status;
pub mod workspace;

pub use error::{Error, Result};
pub use pr::PullRequest;
pub use stage::{default_exclusions, PatternOutcome, StageOptions, StageReport, DEFAULT_EXCLUDE_PATTERNS};
pub use status::{Conflict, FileChange, StatusEntry, StatusReport};
pub use workspace::{Commit, GitWorkspace, Push};
