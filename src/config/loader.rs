// Configuration file loading

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::git::CommitIdentity;

/// git-tools configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolsConfig {
    /// Transport settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Repository defaults
    #[serde(default)]
    pub repository: RepositorySettings,
    /// Identity for commits made through the tools
    #[serde(default)]
    pub identity: Option<CommitIdentity>,
}

/// Transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address to bind the HTTP server to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins (empty means any)
    #[serde(rename = "corsOrigins", alias = "cors_origins", default)]
    pub cors_origins: Vec<String>,
}

fn default_bind() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3470 }

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Repository configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RepositorySettings {
    /// Repository used when a tool call omits `repo_path`
    #[serde(rename = "defaultPath", alias = "default_path", default)]
    pub default_path: Option<PathBuf>,
}

/// Values given on the command line or through the environment.
/// `None` leaves the file value in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub default_repo_path: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
}

impl ToolsConfig {
    /// Apply CLI/environment overrides on top of file values
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(path) = overrides.default_repo_path {
            self.repository.default_path = Some(path);
        }
        if let Some(bind) = overrides.bind {
            self.server.bind = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        self
    }
}

/// Configuration loader
pub struct ConfigLoader {
    /// Global config path
    global_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            global_path: Self::get_global_config_path(),
        }
    }

    /// Use an explicit config file instead of the global one
    pub fn with_path(path: &Path) -> Self {
        Self {
            global_path: Some(path.to_path_buf()),
        }
    }

    /// Get the global config path
    fn get_global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("git-tools").join("config.toml"))
    }

    /// Config path this loader reads from
    pub fn config_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Load the configured file, or defaults when there is none
    pub fn load(&self) -> Result<ToolsConfig> {
        match self.global_path {
            Some(ref path) => Ok(self.load_from_path(path)?.unwrap_or_default()),
            None => Ok(ToolsConfig::default()),
        }
    }

    /// Load config from a specific path
    pub fn load_from_path(&self, path: &Path) -> Result<Option<ToolsConfig>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: ToolsConfig = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        self.validate_config(&config)?;

        Ok(Some(config))
    }

    /// Validate config values
    fn validate_config(&self, config: &ToolsConfig) -> Result<()> {
        if config.server.port == 0 {
            return Err(anyhow!("port must be greater than 0"));
        }

        if let Some(identity) = &config.identity {
            if identity.name.trim().is_empty() || identity.email.trim().is_empty() {
                return Err(anyhow!("identity requires both name and email"));
            }
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_loads_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let config_content = r#"
[server]
bind = "0.0.0.0"
port = 8080

[repository]
default_path = "/srv/repo"

[identity]
name = "Agent"
email = "agent@example.com"
"#;
        fs::write(&config_path, config_content).unwrap();

        let config = ConfigLoader::with_path(&config_path).load().unwrap();
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.repository.default_path,
            Some(PathBuf::from("/srv/repo"))
        );
        assert_eq!(config.identity.unwrap().name, "Agent");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_path(&temp_dir.path().join("absent.toml"));

        let config = loader.load().unwrap();
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.port, 3470);
        assert!(config.repository.default_path.is_none());
        assert!(config.identity.is_none());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[server]\nport = 0\n").unwrap();

        assert!(ConfigLoader::with_path(&config_path).load().is_err());

        fs::write(&config_path, "[identity]\nname = \"\"\nemail = \"a@b\"\n").unwrap();
        assert!(ConfigLoader::with_path(&config_path).load().is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = ToolsConfig::default().apply_overrides(ConfigOverrides {
            default_repo_path: Some(PathBuf::from("/override")),
            bind: None,
            port: Some(9000),
        });

        assert_eq!(
            config.repository.default_path,
            Some(PathBuf::from("/override"))
        );
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }
}
