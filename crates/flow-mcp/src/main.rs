//! Devflow MCP Server
//!
//! A Model Context Protocol server exposing developer-workflow tools
//! (git staging/commit/push/PR, Maven test execution, JaCoCo coverage
//! parsing) to agentic IDEs.
//!
//! # Usage
//!
//! ```bash
//! flow-mcp [--root <path>]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `flow_mcp=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;

use clap::Parser;
use flow_mcp::{McpServer, ServerConfig, Toolbox};

/// MCP server for developer workflows
#[derive(Parser)]
#[command(name = "flow-mcp")]
#[command(about = "MCP server exposing git, Maven, and coverage workflow tools")]
#[command(version)]
struct Args {
    /// Repository/project root path
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flow_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!(root = ?args.root, "Starting flow-mcp server");

    let config = ServerConfig::load(&args.root)?;
    let toolbox = Toolbox::new(args.root, &config);
    let mut server = McpServer::new(toolbox, config);
    server.run().await?;

    Ok(())
}
