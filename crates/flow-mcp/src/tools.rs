//! MCP Tool definitions and result types.
//!
//! # Tool Categories
//!
//! ## Git Operations
//! - `git_status` - Classify the working tree into staged/unstaged/untracked/conflict buckets
//! - `git_add_all` - Stage everything, then unstage excluded patterns
//! - `git_commit` - Commit staged changes, optionally annotated with coverage
//! - `git_push` - Push with upstream configuration
//! - `git_pull_request` - Create a PR via the GitHub CLI (manual fallback)
//!
//! ## Build & Coverage
//! - `run_tests` - Execute the Maven test suite
//! - `project_status` - Compilation health of a Maven project
//! - `parse_coverage` - Parse a JaCoCo XML report
//! - `coverage_recommendations` - Recommendations derived from coverage data
//!
//! ## Composition
//! - `run_workflow` - test → coverage → status → stage → commit → push,
//!   every step runs regardless of prior failures

use serde::{Deserialize, Serialize};

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }
}

/// Get all available tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        // Git Operations
        ToolDefinition {
            name: "git_status".to_string(),
            description: "Return git status including clean state, classified changes, and conflicts"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "repo_path": {
                        "type": "string",
                        "description": "Repository path (defaults to the server root)"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "git_add_all".to_string(),
            description: "Stage all changes, excluding build artifacts and temporary files"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "repo_path": {
                        "type": "string",
                        "description": "Repository path (defaults to the server root)"
                    },
                    "exclude_patterns": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Glob patterns to unstage (defaults to the built-in artifact set)"
                    },
                    "strict": {
                        "type": "boolean",
                        "description": "Abort on the first exclusion pattern that fails to unstage"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "git_commit".to_string(),
            description: "Commit staged changes, optionally appending coverage statistics"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "Commit message"
                    },
                    "repo_path": {
                        "type": "string",
                        "description": "Repository path (defaults to the server root)"
                    },
                    "include_coverage": {
                        "type": "boolean",
                        "description": "Append line coverage when a report is present (default true)"
                    }
                },
                "required": ["message"]
            }),
        },
        ToolDefinition {
            name: "git_push".to_string(),
            description: "Push to a remote, configuring the upstream on first contact".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "remote": {
                        "type": "string",
                        "description": "Remote name (defaults to origin)"
                    },
                    "branch": {
                        "type": "string",
                        "description": "Branch to push (defaults to main)"
                    },
                    "repo_path": {
                        "type": "string",
                        "description": "Repository path (defaults to the server root)"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "git_pull_request".to_string(),
            description: "Create a pull request against a base branch, with manual instructions when the GitHub CLI is unavailable"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "base": {
                        "type": "string",
                        "description": "Base branch (defaults to main)"
                    },
                    "title": {
                        "type": "string",
                        "description": "PR title (defaults to the last commit subject)"
                    },
                    "body": {
                        "type": "string",
                        "description": "PR body (defaults to coverage plus recent commits)"
                    },
                    "repo_path": {
                        "type": "string",
                        "description": "Repository path (defaults to the server root)"
                    }
                }
            }),
        },
        // Build & Coverage
        ToolDefinition {
            name: "run_tests".to_string(),
            description: "Execute the Maven test suite and return the outcome".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_path": {
                        "type": "string",
                        "description": "Maven project directory"
                    }
                },
                "required": ["project_path"]
            }),
        },
        ToolDefinition {
            name: "project_status".to_string(),
            description: "Report compilation health of a Maven project".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_path": {
                        "type": "string",
                        "description": "Maven project directory"
                    }
                },
                "required": ["project_path"]
            }),
        },
        ToolDefinition {
            name: "parse_coverage".to_string(),
            description: "Parse a JaCoCo XML report and extract coverage data".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "report_path": {
                        "type": "string",
                        "description": "Path to the jacoco.xml report"
                    }
                },
                "required": ["report_path"]
            }),
        },
        ToolDefinition {
            name: "coverage_recommendations".to_string(),
            description: "Generate recommendations to improve coverage".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "coverage_data": {
                        "type": "object",
                        "description": "Coverage data as returned by parse_coverage"
                    }
                },
                "required": ["coverage_data"]
            }),
        },
        // Composition
        ToolDefinition {
            name: "run_workflow".to_string(),
            description: "Run the full test/coverage/stage/commit/push sequence; every step runs and all results are returned together"
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_path": {
                        "type": "string",
                        "description": "Maven project directory"
                    },
                    "commit_message": {
                        "type": "string",
                        "description": "Commit message for the commit step"
                    },
                    "repo_path": {
                        "type": "string",
                        "description": "Repository path (defaults to the project path)"
                    },
                    "exclude_patterns": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Glob patterns to unstage (defaults to the built-in artifact set)"
                    },
                    "remote": {
                        "type": "string",
                        "description": "Remote name (defaults to origin)"
                    },
                    "branch": {
                        "type": "string",
                        "description": "Branch to push (defaults to main)"
                    }
                },
                "required": ["project_path", "commit_message"]
            }),
        },
    ]
}
