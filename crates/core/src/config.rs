use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_HOST: &str = "localhost:8086";
pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_PASSWORD: &str = "root";

/// Connection settings for the time-series sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// `host:port` of the InfluxDB HTTP API
    pub host: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

/// Application configuration, built once at startup and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prepended to every series name; empty means no prefix
    pub prefix: String,

    /// Print the series even when a sink is configured
    pub verbose: bool,

    /// Present only when a database name was configured
    pub sink: Option<SinkConfig>,
}

/// Settings read from a JSON configuration file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub prefix: Option<String>,
    pub verbose: Option<bool>,
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

/// CLI configuration (temporary struct for CLI parsing)
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub prefix: Option<String>,
    pub verbose: bool,
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

/// Effective settings before the sink decision is made
#[derive(Debug, Clone)]
struct Settings {
    prefix: String,
    verbose: bool,
    host: String,
    username: String,
    password: String,
    database: String,
}

impl Settings {
    fn defaults() -> Self {
        Self {
            prefix: default_prefix(),
            verbose: false,
            host: DEFAULT_HOST.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            database: String::new(),
        }
    }

    fn merge(&mut self, file: FileConfig) {
        if let Some(prefix) = file.prefix {
            self.prefix = prefix;
        }
        if let Some(verbose) = file.verbose {
            self.verbose = verbose;
        }
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(username) = file.username {
            self.username = username;
        }
        if let Some(password) = file.password {
            self.password = password;
        }
        if let Some(database) = file.database {
            self.database = database;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &CliConfig) {
        if let Some(prefix) = &cli.prefix {
            self.prefix = prefix.clone();
        }
        if cli.verbose {
            self.verbose = true;
        }
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(username) = &cli.username {
            self.username = username.clone();
        }
        if let Some(password) = &cli.password {
            self.password = password.clone();
        }
        if let Some(database) = &cli.database {
            self.database = database.clone();
        }
    }

    fn into_config(self) -> Config {
        let sink = if self.database.is_empty() {
            None
        } else {
            Some(SinkConfig {
                host: self.host,
                username: self.username,
                password: self.password,
                database: self.database,
            })
        };

        Config {
            prefix: self.prefix,
            verbose: self.verbose,
            sink,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Settings::defaults().into_config()
    }
}

impl Config {
    /// Load configuration from multiple sources in order of preference:
    /// 1. CLI arguments override everything
    /// 2. JSON config file if specified
    /// 3. Default config file locations
    /// 4. Built-in defaults
    pub fn load(cli_config: Option<&CliConfig>, json_path: Option<&Path>) -> Result<Self> {
        let mut settings = Settings::defaults();

        match json_path {
            Some(path) => settings.merge(Self::load_from_file(path)?),
            None => {
                if let Some(file) = Self::load_default_config() {
                    settings.merge(file);
                }
            }
        }

        if let Some(cli) = cli_config {
            settings.apply_cli_overrides(cli);
        }

        let config = settings.into_config();
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a specific JSON file
    pub fn load_from_file(path: &Path) -> Result<FileConfig> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CoreError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            CoreError::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Load settings from the first default location that holds a readable file
    fn load_default_config() -> Option<FileConfig> {
        for path in Self::default_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(file) => {
                    tracing::debug!(path = %path.display(), "Loaded configuration file");
                    return Some(file);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring configuration file");
                }
            }
        }

        None
    }

    /// Get default configuration file search paths
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("sysflux").join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".sysflux.json"));
        }

        // Current directory
        paths.push(PathBuf::from("sysflux.json"));

        paths
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if let Some(sink) = &self.sink {
            if sink.host.trim().is_empty() {
                return Err(CoreError::config(
                    "A sink host is required when a database is configured",
                ));
            }
        }

        Ok(())
    }
}

/// Local host name, or an empty prefix when it can't be determined
pub fn default_prefix() -> String {
    sysinfo::System::host_name().unwrap_or_default()
}
