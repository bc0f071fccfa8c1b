//! Tool dispatch and handlers.
//!
//! [`Toolbox`] owns the operation components (root path, exclusion set,
//! Maven runner), is constructed once at startup from the server
//! configuration, and is handed to the server — there is no process-wide
//! tool registry.
//!
//! Handlers convert expected operational failures (non-zero exits, missing
//! files, not-a-repository) into structured `{"error": ...}` result
//! objects rather than protocol errors; only malformed requests (unknown
//! tool, bad arguments) surface as [`Error`] and become
//! `ToolResult::error` at the server boundary.
//!
//! Note: Handler functions use `async fn` for consistency with the MCP
//! server's tokio runtime, even though every implementation performs
//! synchronous, blocking process I/O.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use flow_coverage::CoverageData;
use flow_git::{GitWorkspace, PullRequest, StageOptions};
use flow_maven::MavenRunner;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::config::ServerConfig;
use crate::error::{Error, Result};

/// The operation components behind the tool surface.
pub struct Toolbox {
    /// Default repository/project root for relative paths.
    root: PathBuf,
    /// Effective exclusion pattern set for staging.
    exclusions: Vec<String>,
    /// Maven invoker (program name may be overridden by configuration).
    maven: MavenRunner,
}

impl Toolbox {
    /// Build the toolbox from the server root and loaded configuration.
    pub fn new(root: PathBuf, config: &ServerConfig) -> Self {
        Self {
            root,
            exclusions: config.exclusions(),
            maven: config.maven_runner(),
        }
    }

    /// The server root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The effective exclusion pattern set.
    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    /// Resolve a caller-supplied path against the server root.
    fn resolve(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        }
    }

    fn workspace_at(&self, repo_path: Option<&str>) -> GitWorkspace {
        match repo_path {
            Some(path) => GitWorkspace::new(self.resolve(path)),
            None => GitWorkspace::new(&self.root),
        }
    }

    /// Dispatch a tool call to the matching handler.
    pub async fn dispatch(&self, tool_name: &str, arguments: Value) -> Result<Value> {
        match tool_name {
            // Git Operations
            "git_status" => self.handle_git_status(arguments).await,
            "git_add_all" => self.handle_git_add_all(arguments).await,
            "git_commit" => self.handle_git_commit(arguments).await,
            "git_push" => self.handle_git_push(arguments).await,
            "git_pull_request" => self.handle_git_pull_request(arguments).await,

            // Build & Coverage
            "run_tests" => self.handle_run_tests(arguments).await,
            "project_status" => self.handle_project_status(arguments).await,
            "parse_coverage" => self.handle_parse_coverage(arguments).await,
            "coverage_recommendations" => self.handle_coverage_recommendations(arguments).await,

            // Composition
            "run_workflow" => self.handle_run_workflow(arguments).await,

            _ => Err(Error::UnknownTool(tool_name.to_string())),
        }
    }

    // ========================================================================
    // Git Operation Handlers
    // ========================================================================

    async fn handle_git_status(&self, arguments: Value) -> Result<Value> {
        let args: RepoArgs = parse_args(arguments)?;
        Ok(self.status_value(args.repo_path.as_deref()))
    }

    async fn handle_git_add_all(&self, arguments: Value) -> Result<Value> {
        let args: AddAllArgs = parse_args(arguments)?;
        let exclusions = args
            .exclude_patterns
            .unwrap_or_else(|| self.exclusions.clone());
        Ok(self.stage_value(
            args.repo_path.as_deref(),
            exclusions,
            args.strict.unwrap_or(false),
        ))
    }

    async fn handle_git_commit(&self, arguments: Value) -> Result<Value> {
        let args: CommitArgs = parse_args(arguments)?;
        Ok(self.commit_value(
            args.repo_path.as_deref(),
            &args.message,
            args.include_coverage.unwrap_or(true),
        ))
    }

    async fn handle_git_push(&self, arguments: Value) -> Result<Value> {
        let args: PushArgs = parse_args(arguments)?;
        Ok(self.push_value(
            args.repo_path.as_deref(),
            args.remote.as_deref().unwrap_or("origin"),
            args.branch.as_deref().unwrap_or("main"),
        ))
    }

    async fn handle_git_pull_request(&self, arguments: Value) -> Result<Value> {
        let args: PullRequestArgs = parse_args(arguments)?;
        let base = args.base.as_deref().unwrap_or("main");
        let workspace = self.workspace_at(args.repo_path.as_deref());

        let branch = match workspace.current_branch() {
            Ok(branch) => branch,
            Err(err) => return Ok(error_value(err)),
        };

        // Empty strings count as unset, matching the tool's lenient
        // argument handling.
        let title = args
            .title
            .filter(|t| !t.is_empty())
            .or_else(|| workspace.last_commit_subject())
            .unwrap_or_else(|| "Automated changes".to_string());
        let body = args
            .body
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| default_pr_body(&workspace, base, &branch));

        Ok(match workspace.create_pull_request(base, &title, &body) {
            Ok(PullRequest::Created { url, branch, base }) => json!({
                "success": true,
                "message": "Pull request created successfully",
                "pull_request_url": url,
                "branch": branch,
                "base": base,
            }),
            Ok(PullRequest::Manual {
                instructions,
                title,
                body,
                branch,
                base,
            }) => json!({
                "success": false,
                "message": "GitHub CLI not available or failed",
                "instructions": instructions,
                "title": title,
                "body": body,
                "branch": branch,
                "base": base,
            }),
            Err(err) => error_value(err),
        })
    }

    // ========================================================================
    // Build & Coverage Handlers
    // ========================================================================

    async fn handle_run_tests(&self, arguments: Value) -> Result<Value> {
        let args: ProjectArgs = parse_args(arguments)?;
        Ok(self.tests_value(&self.resolve(&args.project_path)))
    }

    async fn handle_project_status(&self, arguments: Value) -> Result<Value> {
        let args: ProjectArgs = parse_args(arguments)?;
        let project = self.resolve(&args.project_path);
        Ok(match self.maven.project_status(&project) {
            Ok(status) => json!({
                "is_maven_project": status.is_maven_project,
                "compilation_success": status.compilation_success,
                "compilation_output": status.compilation_output,
            }),
            Err(err) => error_value(err),
        })
    }

    async fn handle_parse_coverage(&self, arguments: Value) -> Result<Value> {
        let args: ReportArgs = parse_args(arguments)?;
        Ok(self.coverage_value(&self.resolve(&args.report_path)))
    }

    async fn handle_coverage_recommendations(&self, arguments: Value) -> Result<Value> {
        let args: RecommendationArgs = parse_args(arguments)?;
        Ok(json!({
            "recommendations": flow_coverage::recommendations(&args.coverage_data),
        }))
    }

    // ========================================================================
    // Workflow Composition
    // ========================================================================

    /// Run the fixed test → coverage → status → stage → commit → push
    /// sequence. Every step executes regardless of prior outcomes; the
    /// caller inspects each sub-result to learn what actually succeeded.
    async fn handle_run_workflow(&self, arguments: Value) -> Result<Value> {
        let args: WorkflowArgs = parse_args(arguments)?;

        let project = self.resolve(&args.project_path);
        // The repository defaults to the project being tested.
        let repo_path = args.repo_path.as_deref().or(Some(args.project_path.as_str()));
        let exclusions = args
            .exclude_patterns
            .unwrap_or_else(|| self.exclusions.clone());

        let mut steps = Map::new();
        steps.insert("test".to_string(), self.tests_value(&project));
        steps.insert(
            "coverage".to_string(),
            self.coverage_value(&flow_coverage::default_report_path(&project)),
        );
        steps.insert("status".to_string(), self.status_value(repo_path));
        steps.insert(
            "stage".to_string(),
            self.stage_value(repo_path, exclusions, false),
        );
        steps.insert(
            "commit".to_string(),
            self.commit_value(repo_path, &args.commit_message, true),
        );
        steps.insert(
            "push".to_string(),
            self.push_value(
                repo_path,
                args.remote.as_deref().unwrap_or("origin"),
                args.branch.as_deref().unwrap_or("main"),
            ),
        );

        Ok(Value::Object(steps))
    }

    // ========================================================================
    // Step Implementations
    // ========================================================================

    fn status_value(&self, repo_path: Option<&str>) -> Value {
        let workspace = self.workspace_at(repo_path);
        match workspace.status() {
            Ok(report) => json!({
                "is_clean": report.is_clean,
                "staged_changes": report.staged,
                "unstaged_changes": report.unstaged,
                "untracked_files": report.untracked,
                "conflicts": report.conflicts,
                "summary": report.summary(),
            }),
            Err(err) => error_value(err),
        }
    }

    fn stage_value(&self, repo_path: Option<&str>, exclusions: Vec<String>, strict: bool) -> Value {
        let workspace = self.workspace_at(repo_path);
        let options = StageOptions { exclusions, strict };
        match workspace.stage_all(&options) {
            Ok(report) => json!({
                "success": true,
                "message": "Changes staged successfully (excluding build artifacts)",
                "staged_files": report.staged_files,
                "excluded_patterns": report.excluded_patterns,
                "pattern_results": report.pattern_results,
            }),
            Err(err) => error_value(err),
        }
    }

    fn commit_value(&self, repo_path: Option<&str>, message: &str, include_coverage: bool) -> Value {
        let workspace = self.workspace_at(repo_path);

        let mut full_message = message.to_string();
        if include_coverage {
            let report_path = flow_coverage::default_report_path(workspace.root());
            if let Ok(data) = flow_coverage::parse_report(&report_path) {
                full_message.push_str(&format!(
                    "\n\nCode Coverage: {:.1}% line coverage",
                    data.line_coverage
                ));
            }
        }

        match workspace.commit(&full_message) {
            Ok(commit) => json!({
                "success": true,
                "message": "Commit created successfully",
                "commit_hash": commit.hash,
                "commit_message": commit.message,
            }),
            Err(err) => error_value(err),
        }
    }

    fn push_value(&self, repo_path: Option<&str>, remote: &str, branch: &str) -> Value {
        let workspace = self.workspace_at(repo_path);
        match workspace.push(remote, branch) {
            Ok(push) => json!({
                "success": true,
                "message": push.message,
                "output": push.output,
            }),
            Err(err @ flow_git::Error::PushFailed { .. }) => json!({
                "error": err.to_string(),
                "hint": "Check your credentials and network connection",
            }),
            Err(err) => error_value(err),
        }
    }

    fn tests_value(&self, project: &Path) -> Value {
        match self.maven.run_tests(project) {
            Ok(run) => json!({
                "success": run.success,
                "output": run.stdout,
                "errors": run.stderr,
            }),
            Err(err) => error_value(err),
        }
    }

    fn coverage_value(&self, report_path: &Path) -> Value {
        match flow_coverage::parse_report(report_path) {
            Ok(data) => serde_json::to_value(data).unwrap_or_else(|err| error_value(err)),
            Err(err) => error_value(err),
        }
    }
}

/// Compose the default PR body: coverage line, recent commits, and the
/// generated-by boilerplate.
fn default_pr_body(workspace: &GitWorkspace, base: &str, branch: &str) -> String {
    let mut coverage_info = String::new();
    let report_path = flow_coverage::default_report_path(workspace.root());
    if let Ok(data) = flow_coverage::parse_report(&report_path) {
        coverage_info = format!(
            "**Code Coverage**: {:.1}% line coverage\n\n",
            data.line_coverage
        );
    }

    let commits = workspace.commits_between(base, branch);
    let mut commit_history = String::new();
    if !commits.is_empty() {
        let start = commits.len().saturating_sub(5);
        let listed: Vec<String> = commits[start..].iter().map(|c| format!("- {c}")).collect();
        commit_history = format!("**Changes in this PR:**\n{}\n\n", listed.join("\n"));
    }

    format!(
        "{coverage_info}{commit_history}\
This pull request was automatically generated by the devflow MCP server.\n\
\n\
**Changes include:**\n\
- Automated test generation and improvements\n\
- Code coverage enhancements\n\
- Test execution results\n"
    )
}

/// Structured error object returned inside a successful tool result.
fn error_value(err: impl Display) -> Value {
    json!({ "error": err.to_string() })
}

/// Deserialize tool arguments, treating absent arguments as an empty
/// object so all-optional argument structs parse cleanly.
fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let value = if arguments.is_null() {
        Value::Object(Map::new())
    } else {
        arguments
    };
    serde_json::from_value(value).map_err(|e| Error::InvalidArgument(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct RepoArgs {
    #[serde(default)]
    repo_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddAllArgs {
    #[serde(default)]
    repo_path: Option<String>,
    #[serde(default)]
    exclude_patterns: Option<Vec<String>>,
    #[serde(default)]
    strict: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CommitArgs {
    message: String,
    #[serde(default)]
    repo_path: Option<String>,
    #[serde(default)]
    include_coverage: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct PushArgs {
    #[serde(default)]
    remote: Option<String>,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    repo_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullRequestArgs {
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    repo_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectArgs {
    project_path: String,
}

#[derive(Debug, Deserialize)]
struct ReportArgs {
    report_path: String,
}

#[derive(Debug, Deserialize)]
struct RecommendationArgs {
    coverage_data: CoverageData,
}

#[derive(Debug, Deserialize)]
struct WorkflowArgs {
    project_path: String,
    commit_message: String,
    #[serde(default)]
    repo_path: Option<String>,
    #[serde(default)]
    exclude_patterns: Option<Vec<String>>,
    #[serde(default)]
    remote: Option<String>,
    #[serde(default)]
    branch: Option<String>,
}
