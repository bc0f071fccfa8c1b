//! JaCoCo coverage report parsing for Devflow
//!
//! [`parse_report`] validates that a report exists and looks like an XML
//! document, and returns the [`CoverageData`] structure that downstream
//! consumers (commit messages, PR bodies) build on. Metric extraction from
//! the report counters is not implemented; callers currently get the
//! zeroed structure.

pub mod error;
pub mod report;

pub use error::{Error, Result};
pub use report::{default_report_path, parse_report, recommendations, CoverageData};
