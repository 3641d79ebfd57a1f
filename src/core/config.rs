//! Configuration module for `MallaPlanner`

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory in path-like values
const DIR_VARIABLE: &str = "$MALLA_PLANNER";

const fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default)]
    pub host: String,
    /// TCP port to bind (0 means "not set")
    #[serde(default)]
    pub port: u16,
    /// Allow cross-origin requests from the browser UI
    #[serde(default = "default_true")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 0,
            cors: true,
        }
    }
}

/// Curriculum dataset configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the `mallas.json` export
    #[serde(default)]
    pub mallas_file: String,
}

/// Language model configuration for the chat relay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Base URL of the generative language API
    #[serde(default)]
    pub endpoint: String,
    /// Model name (e.g. `gemini-2.5-flash`)
    #[serde(default)]
    pub model: String,
    /// API key stored in the config file (the environment variable wins)
    #[serde(default)]
    pub api_key: String,
    /// Name of the environment variable holding the API key
    #[serde(default)]
    pub api_key_env: String,
    /// Upstream request timeout in seconds (0 means "not set")
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Dataset settings
    #[serde(default)]
    pub data: DataConfig,
    /// Chat relay settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override bind host
    pub host: Option<String>,
    /// Override bind port
    pub port: Option<u16>,
    /// Override dataset path
    pub mallas_file: Option<String>,
    /// Override chat model
    pub model: Option<String>,
    /// Override chat endpoint
    pub endpoint: Option<String>,
}

impl Config {
    /// Get the `$MALLA_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/mallaplanner`
    /// - macOS: `~/Library/Application Support/mallaplanner`
    /// - Windows: `%APPDATA%\mallaplanner`
    #[must_use]
    pub fn get_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mallaplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or zero) in the current config and set in
    /// `defaults` are updated, so upgrades pick up new settings without
    /// touching user values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        fn fill(target: &mut String, default: &str) -> bool {
            if target.is_empty() && !default.is_empty() {
                default.clone_into(target);
                true
            } else {
                false
            }
        }

        let mut changed = false;
        changed |= fill(&mut self.logging.level, &defaults.logging.level);
        changed |= fill(&mut self.logging.file, &defaults.logging.file);
        changed |= fill(&mut self.server.host, &defaults.server.host);
        changed |= fill(&mut self.data.mallas_file, &defaults.data.mallas_file);
        changed |= fill(&mut self.chat.endpoint, &defaults.chat.endpoint);
        changed |= fill(&mut self.chat.model, &defaults.chat.model);
        changed |= fill(&mut self.chat.api_key_env, &defaults.chat.api_key_env);

        if self.server.port == 0 && defaults.server.port != 0 {
            self.server.port = defaults.server.port;
            changed = true;
        }
        if self.chat.timeout_secs == 0 && defaults.chat.timeout_secs != 0 {
            self.chat.timeout_secs = defaults.chat.timeout_secs;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for the current run only; the config file is not modified.
    /// Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(host) = &overrides.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(mallas_file) = &overrides.mallas_file {
            self.data.mallas_file.clone_from(mallas_file);
        }
        if let Some(model) = &overrides.model {
            self.chat.model.clone_from(model);
        }
        if let Some(endpoint) = &overrides.endpoint {
            self.chat.endpoint.clone_from(endpoint);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_config_dir`](Self::get_config_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_config_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$MALLA_PLANNER` in a string to the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_config_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults. `$MALLA_PLANNER` is expanded in
    /// path-like values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.data.mallas_file = Self::expand_variables(&config.data.mallas_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults
    /// are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - Existing file: loaded, missing fields merged from defaults and saved back.
    /// - First run: config directory and file are created from defaults.
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot be
    /// serialized, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// `host:port` the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Resolve the chat API key
    ///
    /// The environment variable named by `chat.api_key_env` wins over
    /// `chat.api_key`. Returns `None` when neither is set.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        let from_env = if self.chat.api_key_env.is_empty() {
            None
        } else {
            env::var(&self.chat.api_key_env)
                .ok()
                .filter(|v| !v.trim().is_empty())
        };
        from_env.or_else(|| {
            if self.chat.api_key.is_empty() {
                None
            } else {
                Some(self.chat.api_key.clone())
            }
        })
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `host`, `port`, `cors`,
    /// `mallas_file`, `endpoint`, `model`, `api_key`, `api_key_env`,
    /// `timeout_secs`. Dashes are accepted in place of underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "host" => Some(self.server.host.clone()),
            "port" => Some(self.server.port.to_string()),
            "cors" => Some(self.server.cors.to_string()),
            "mallas_file" => Some(self.data.mallas_file.clone()),
            "endpoint" => Some(self.chat.endpoint.clone()),
            "model" => Some(self.chat.model.clone()),
            "api_key" => Some(self.chat.api_key.clone()),
            "api_key_env" => Some(self.chat.api_key_env.clone()),
            "timeout_secs" => Some(self.chat.timeout_secs.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse for
    /// typed keys (`verbose`, `cors`, `port`, `timeout_secs`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "host" => self.server.host = value.to_string(),
            "port" => {
                self.server.port = value
                    .parse::<u16>()
                    .map_err(|_| format!("Invalid port: '{value}'"))?;
            }
            "cors" => {
                self.server.cors = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'cors': '{value}'"))?;
            }
            "mallas_file" => self.data.mallas_file = value.to_string(),
            "endpoint" => self.chat.endpoint = value.to_string(),
            "model" => self.chat.model = value.to_string(),
            "api_key" => self.chat.api_key = value.to_string(),
            "api_key_env" => self.chat.api_key_env = value.to_string(),
            "timeout_secs" => {
                self.chat.timeout_secs = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid timeout in seconds: '{value}'"))?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to the value in `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "host" => self.server.host.clone_from(&defaults.server.host),
            "port" => self.server.port = defaults.server.port,
            "cors" => self.server.cors = defaults.server.cors,
            "mallas_file" => self.data.mallas_file.clone_from(&defaults.data.mallas_file),
            "endpoint" => self.chat.endpoint.clone_from(&defaults.chat.endpoint),
            "model" => self.chat.model.clone_from(&defaults.chat.model),
            "api_key" => self.chat.api_key.clone_from(&defaults.chat.api_key),
            "api_key_env" => self.chat.api_key_env.clone_from(&defaults.chat.api_key_env),
            "timeout_secs" => self.chat.timeout_secs = defaults.chat.timeout_secs,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if the file does
    /// not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[server]")?;
        writeln!(f, "  host = \"{}\"", self.server.host)?;
        writeln!(f, "  port = {}", self.server.port)?;
        writeln!(f, "  cors = {}", self.server.cors)?;

        writeln!(f, "\n[data]")?;
        writeln!(f, "  mallas_file = \"{}\"", self.data.mallas_file)?;

        writeln!(f, "\n[chat]")?;
        writeln!(f, "  endpoint = \"{}\"", self.chat.endpoint)?;
        writeln!(f, "  model = \"{}\"", self.chat.model)?;
        // never echo the key itself
        let key_state = if self.chat.api_key.is_empty() {
            "(unset)"
        } else {
            "(set)"
        };
        writeln!(f, "  api_key = {key_state}")?;
        writeln!(f, "  api_key_env = \"{}\"", self.chat.api_key_env)?;
        writeln!(f, "  timeout_secs = {}", self.chat.timeout_secs)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = Config::from_defaults();
        assert!(!config.logging.level.is_empty());
        assert_eq!(config.server.port, 3001);
        assert!(config.server.cors);
        assert_eq!(config.chat.model, "gemini-2.5-flash");
        assert_eq!(config.chat.api_key_env, "API_KEY");
    }

    #[test]
    fn test_bind_address() {
        let mut config = Config::from_defaults();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_api_key_falls_back_to_config_value() {
        let mut config = Config::from_defaults();
        config.chat.api_key_env = "MALLA_PLANNER_TEST_UNSET_KEY_VAR".to_string();
        assert!(config.api_key().is_none());

        config.chat.api_key = "from-config".to_string();
        assert_eq!(config.api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn test_display_hides_api_key() {
        let mut config = Config::from_defaults();
        config.chat.api_key = "super-secret".to_string();
        let shown = config.to_string();
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("api_key = (set)"));
    }
}
