//! Configuration management for penrose-md.
//!
//! Parses `penrose.toml` configuration files with serde and provides
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
//! - `vault.root`
//! - `compiler.command`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override vault root directory.
    pub vault_root: Option<PathBuf>,
    /// Override external compiler command.
    pub compiler_command: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "penrose.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault configuration (paths are relative strings from TOML).
    vault: VaultConfigRaw,
    /// Code block configuration.
    pub blocks: BlocksConfig,
    /// External diagram compiler (optional section).
    /// When present, `command` is required.
    pub compiler: Option<CompilerConfig>,

    /// Resolved vault configuration (set after loading).
    #[serde(skip)]
    pub vault_resolved: VaultConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw vault configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct VaultConfigRaw {
    root: Option<String>,
}

/// Resolved vault configuration with absolute paths.
#[derive(Debug, Default)]
pub struct VaultConfig {
    /// Directory that diagram references resolve against.
    pub root: PathBuf,
}

/// Code block configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BlocksConfig {
    /// Fence language tag of diagram code blocks.
    pub language: String,
    /// CSS class of the element wrapping rendered output.
    pub class: String,
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            language: "penrose".to_owned(),
            class: "penrose-diagram".to_owned(),
        }
    }
}

/// External diagram compiler configuration.
#[derive(Debug, Deserialize)]
pub struct CompilerConfig {
    /// Executable that reads a trio as JSON on stdin and writes SVG to stdout.
    pub command: String,
    /// Extra arguments passed to the command.
    #[serde(default)]
    pub args: Vec<String>,
}

impl CompilerConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the command is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.command, "compiler.command")
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
        /// Config field path (e.g., "`compiler.command`").
        field: String,
        /// Error message (e.g., "${`PENROSE_COMPILER`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `penrose.toml` in current directory and parents.
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
        if let Some(vault_root) = &settings.vault_root {
            self.vault_resolved.root.clone_from(vault_root);
        }
        if let Some(command) = &settings.compiler_command {
            match &mut self.compiler {
                Some(compiler) => compiler.command.clone_from(command),
                None => {
                    self.compiler = Some(CompilerConfig {
                        command: command.clone(),
                        args: Vec::new(),
                    });
                }
            }
        }
    }

    /// Get validated compiler configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_compiler(&self) -> Result<&CompilerConfig, ConfigError> {
        let compiler = self.compiler.as_ref().ok_or_else(|| {
            ConfigError::Validation(
                "[compiler] section or --compiler option required to render diagrams".into(),
            )
        })?;
        compiler.validate()?;
        Ok(compiler)
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
            vault: VaultConfigRaw::default(),
            blocks: BlocksConfig::default(),
            compiler: None,
            vault_resolved: VaultConfig {
                root: base.to_path_buf(),
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
        self.validate_blocks()?;
        if let Some(compiler) = &self.compiler {
            compiler.validate()?;
        }
        Ok(())
    }

    /// Validate code block configuration.
    fn validate_blocks(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.blocks.language, "blocks.language")?;
        require_non_empty(&self.blocks.class, "blocks.class")?;

        // Fence info strings are split on whitespace, so such a tag never matches
        if self.blocks.language.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "blocks.language cannot contain whitespace".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.vault.root {
            self.vault.root = Some(expand::expand_env(root, "vault.root")?);
        }

        if let Some(ref mut compiler) = self.compiler {
            compiler.command = expand::expand_env(&compiler.command, "compiler.command")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.vault_resolved = VaultConfig {
            root: config_dir.join(self.vault.root.as_deref().unwrap_or(".")),
        };
    }
}
