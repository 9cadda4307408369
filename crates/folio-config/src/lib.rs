//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `server.static_dir`
//! - `storage.data_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the data directory.
    pub data_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Largest accepted `tree.max_depth`.
pub const MAX_TREE_DEPTH: usize = 4096;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Storage configuration (paths are relative strings from TOML).
    storage: StorageConfigRaw,
    /// Page tree configuration.
    pub tree: TreeConfig,
    /// Assistant configuration.
    pub assistant: AssistantConfig,

    /// Resolved filesystem paths (set after loading).
    #[serde(skip)]
    pub paths: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Directory with static assets, relative to the config file.
    static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            static_dir: None,
        }
    }
}

/// Raw storage configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StorageConfigRaw {
    data_dir: Option<String>,
}

/// Page tree configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Bound on root-to-leaf path length before the tree is treated as cyclic.
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Assistant configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Model names offered on the settings page.
    pub models: Vec<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            models: ["Gemini", "GPT-4", "Claude", "Other"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Resolved filesystem paths.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Directory holding `pages.json` and `settings.json`.
    pub data_dir: PathBuf,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl PathsConfig {
    /// Page store file.
    #[must_use]
    pub fn pages_file(&self) -> PathBuf {
        self.data_dir.join("pages.json")
    }

    /// Settings file.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`storage.data_dir`").
        field: String,
        /// Error message (e.g., "${`FOLIO_DATA`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(data_dir) = &settings.data_dir {
            self.paths.data_dir.clone_from(data_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfigRaw::default(),
            tree: TreeConfig::default(),
            assistant: AssistantConfig::default(),
            paths: PathsConfig {
                data_dir: base.to_path_buf(),
                static_dir: base.join("static"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_tree()?;
        self.validate_assistant()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate tree configuration.
    fn validate_tree(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TREE_DEPTH).contains(&self.tree.max_depth) {
            return Err(ConfigError::Validation(format!(
                "tree.max_depth must be between 1 and {MAX_TREE_DEPTH}"
            )));
        }
        Ok(())
    }

    /// Validate assistant configuration.
    fn validate_assistant(&self) -> Result<(), ConfigError> {
        if self.assistant.models.is_empty() {
            return Err(ConfigError::Validation(
                "assistant.models cannot be empty".to_owned(),
            ));
        }
        for model in &self.assistant.models {
            require_non_empty(model, "assistant.models entry")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref dir) = self.server.static_dir {
            self.server.static_dir = Some(expand::expand_env(dir, "server.static_dir")?);
        }
        if let Some(ref dir) = self.storage.data_dir {
            self.storage.data_dir = Some(expand::expand_env(dir, "storage.data_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.paths = PathsConfig {
            data_dir: self
                .storage
                .data_dir
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |dir| config_dir.join(dir)),
            static_dir: resolve(self.server.static_dir.as_deref(), "static"),
        };
    }
}
