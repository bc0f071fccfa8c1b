//! MCP Resources: read-only server state.
//!
//! | URI | Description | Content-Type |
//! |-----|-------------|--------------|
//! | `flow://exclusions` | Effective staging exclusion patterns | application/json |
//! | `flow://config` | Effective server configuration | application/toml |

use serde_json::json;

use crate::config::ServerConfig;
use crate::error::{Error, Result};

/// Resource definition for MCP protocol
#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

/// Content returned from a resource read
#[derive(Debug, Clone)]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

/// Get all available resource definitions
pub fn get_resource_definitions() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition {
            uri: "flow://exclusions".to_string(),
            name: "Staging exclusions".to_string(),
            description: "Effective glob patterns unstaged after git_add_all".to_string(),
            mime_type: "application/json".to_string(),
        },
        ResourceDefinition {
            uri: "flow://config".to_string(),
            name: "Server configuration".to_string(),
            description: "Effective devflow.toml configuration".to_string(),
            mime_type: "application/toml".to_string(),
        },
    ]
}

/// Read a resource by URI.
///
/// Returns [`Error::UnknownResource`] for unrecognized URIs.
pub fn read_resource(config: &ServerConfig, uri: &str) -> Result<ResourceContent> {
    match uri {
        "flow://exclusions" => Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "application/json".to_string(),
            text: serde_json::to_string_pretty(&json!(config.exclusions()))?,
        }),
        "flow://config" => Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "application/toml".to_string(),
            text: toml::to_string_pretty(config)?,
        }),
        _ => Err(Error::UnknownResource(uri.to_string())),
    }
}
