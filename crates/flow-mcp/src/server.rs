//! MCP Server implementation
//!
//! The stdio JSON-RPC loop that fronts the devflow toolbox.

use std::io::{BufRead, Write};

use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::handlers::Toolbox;
use crate::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ReadResourceParams, ResourcesCapability,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability,
};
use crate::resources::{get_resource_definitions, read_resource, ResourceDefinition};
use crate::tools::{get_tool_definitions, ToolDefinition, ToolResult};
use crate::{Error, Result};

/// MCP server for developer-workflow tools.
///
/// Exposes git, Maven, and coverage operations over JSON-RPC 2.0 on
/// stdio. The toolbox and configuration are injected at construction;
/// the server holds no global state.
pub struct McpServer {
    /// Operation components behind the tool surface
    toolbox: Toolbox,

    /// Effective configuration (backs the `flow://config` resource)
    config: ServerConfig,

    /// Whether the server has been initialized
    initialized: bool,

    /// Available MCP tools
    tools: Vec<ToolDefinition>,

    /// Available MCP resources
    resources: Vec<ResourceDefinition>,
}

impl McpServer {
    /// Create a new server around an already-constructed toolbox.
    pub fn new(toolbox: Toolbox, config: ServerConfig) -> Self {
        Self {
            toolbox,
            config,
            initialized: false,
            tools: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Load tool and resource definitions.
    pub fn initialize(&mut self) -> Result<()> {
        tracing::info!(root = ?self.toolbox.root(), "Initializing MCP server");

        self.tools = get_tool_definitions();
        self.resources = get_resource_definitions();

        self.initialized = true;
        Ok(())
    }

    /// Run the server: read requests from stdin, write responses to
    /// stdout, one JSON-RPC message per line. Logs go to stderr.
    pub async fn run(&mut self) -> Result<()> {
        self.initialize()?;

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        tracing::info!("MCP server ready, listening on stdio");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            match self.handle_message(&line).await {
                Ok(response) if !response.is_empty() => {
                    writeln!(stdout, "{}", response)?;
                    stdout.flush()?;
                }
                Ok(_) => {} // No response needed (notifications)
                Err(e) => {
                    let error_response =
                        JsonRpcResponse::error(None, -32603, format!("Internal error: {}", e));
                    let json_str = serde_json::to_string(&error_response)?;
                    writeln!(stdout, "{}", json_str)?;
                    stdout.flush()?;
                }
            }
        }

        Ok(())
    }

    /// Handle a single JSON-RPC message; empty string means no response
    /// (notification).
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = serde_json::from_str(message)?;

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id)?,
            "initialized" => return Ok(String::new()),
            "notifications/initialized" => return Ok(String::new()),
            "tools/list" => self.handle_tools_list(request.id)?,
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            "resources/list" => self.handle_resources_list(request.id)?,
            "resources/read" => self.handle_resources_read(request.id, request.params)?,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    fn handle_initialize(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let result = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "flow-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let tools_value: Vec<Value> = get_tool_definitions()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        Ok(JsonRpcResponse::success(id, json!({ "tools": tools_value })))
    }

    /// Execute a tool. Operational failures come back as structured
    /// `{"error": ...}` payloads from the toolbox; only dispatch-level
    /// failures (unknown tool, malformed arguments) become
    /// `ToolResult::error`.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let tool_params: ToolCallParams = serde_json::from_value(params)?;

        match self
            .toolbox
            .dispatch(&tool_params.name, tool_params.arguments)
            .await
        {
            Ok(result) => {
                let tool_result = ToolResult::text(serde_json::to_string_pretty(&result)?);
                Ok(JsonRpcResponse::success(
                    id,
                    serde_json::to_value(tool_result)?,
                ))
            }
            Err(e) => {
                let tool_result = ToolResult::error(format!("{}", e));
                Ok(JsonRpcResponse::success(
                    id,
                    serde_json::to_value(tool_result)?,
                ))
            }
        }
    }

    fn handle_resources_list(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let resources_value: Vec<Value> = get_resource_definitions()
            .iter()
            .map(|r| {
                json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect();

        Ok(JsonRpcResponse::success(
            id,
            json!({ "resources": resources_value }),
        ))
    }

    fn handle_resources_read(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let read_params: ReadResourceParams = serde_json::from_value(params)?;

        match read_resource(&self.config, &read_params.uri) {
            Ok(content) => {
                let result = json!({
                    "contents": [{
                        "uri": content.uri,
                        "mimeType": content.mime_type,
                        "text": content.text
                    }]
                });
                Ok(JsonRpcResponse::success(id, result))
            }
            Err(e) => Ok(JsonRpcResponse::error(
                id,
                -32602,
                format!("Resource error: {}", e),
            )),
        }
    }

    /// Check if the server is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get available tools
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Get available resources
    pub fn resources(&self) -> &[ResourceDefinition] {
        &self.resources
    }
}
