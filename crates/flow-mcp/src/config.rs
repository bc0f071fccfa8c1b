//! Server configuration loading.
//!
//! An optional `devflow.toml` at the workspace root tunes the exclusion
//! set and the Maven program. Absent file or absent keys fall back to the
//! built-in defaults.

use std::fs;
use std::path::Path;

use flow_maven::MavenRunner;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration file name, looked up in the server root.
pub const CONFIG_FILENAME: &str = "devflow.toml";

/// Top-level server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub git: GitSection,
    #[serde(default)]
    pub maven: MavenSection,
}

/// `[git]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitSection {
    /// Replaces the built-in exclusion pattern set when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

/// `[maven]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MavenSection {
    /// Program invoked for Maven goals. Defaults to `mvn` from `PATH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

impl ServerConfig {
    /// Load `devflow.toml` from `root`, or the defaults when the file does
    /// not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded server configuration");
        Ok(config)
    }

    /// The effective exclusion pattern set.
    pub fn exclusions(&self) -> Vec<String> {
        self.git
            .exclude
            .clone()
            .unwrap_or_else(flow_git::default_exclusions)
    }

    /// The effective Maven runner.
    pub fn maven_runner(&self) -> MavenRunner {
        match &self.maven.program {
            Some(program) => MavenRunner::with_program(program),
            None => MavenRunner::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig::load(temp.path()).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.exclusions(), flow_git::default_exclusions());
    }

    #[test]
    fn exclude_override_replaces_builtin_set() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            "[git]\nexclude = [\"*.tmp\", \"scratch/\"]\n",
        )
        .unwrap();

        let config = ServerConfig::load(temp.path()).unwrap();
        assert_eq!(
            config.exclusions(),
            vec!["*.tmp".to_string(), "scratch/".to_string()]
        );
    }

    #[test]
    fn maven_program_override() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            "[maven]\nprogram = \"mvnw\"\n",
        )
        .unwrap();

        let config = ServerConfig::load(temp.path()).unwrap();
        assert_eq!(config.maven.program.as_deref(), Some("mvnw"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "[git\nbroken").unwrap();
        assert!(ServerConfig::load(temp.path()).is_err());
    }
}
