//! Maven test execution and project status for Devflow
//!
//! [`MavenRunner`] is a thin, blocking wrapper around the `mvn` CLI. Both
//! operations report the process outcome as data — a failing build is a
//! result, not an error; only an unspawnable child is an error.

pub mod error;
pub mod runner;

pub use error::{Error, Result};
pub use runner::{MavenRunner, ProjectStatus, TestRun};
