//! Configuration system
//!
//! Provides layered configuration with:
//! - Runtime defaults
//! - Config file loading (optional, TOML)
//! - Environment variable overrides
//! - Validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Log reading configuration
    pub processing: ProcessingConfig,

    /// Report rendering configuration
    pub output: OutputConfig,

    /// Paths configuration
    pub paths: PathsConfig,

    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub buffer_size_kb: usize,
    pub max_line_mb: usize,
    pub log_suffix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub timestamp_format: String,
    pub session_width: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub claude_home: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
    pub log_directory: PathBuf,
}

/// Lines up to this size must always be readable.
pub const MIN_MAX_LINE_MB: usize = 10;

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
            output: "console".to_string(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            buffer_size_kb: 64,
            max_line_mb: MIN_MAX_LINE_MB,
            log_suffix: ".jsonl".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
            session_width: 20,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            claude_home: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".claude"),
            data_path: None,
            log_directory: PathBuf::from("logs"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            processing: ProcessingConfig::default(),
            output: OutputConfig::default(),
            paths: PathsConfig::default(),
            source: None,
        }
    }
}

impl ProcessingConfig {
    pub fn buffer_size_bytes(&self) -> usize {
        self.buffer_size_kb * 1024
    }

    pub fn max_line_bytes(&self) -> usize {
        self.max_line_mb * 1024 * 1024
    }
}

impl PathsConfig {
    /// Root directory scanned for logs when no `--path` is given.
    pub fn default_data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| self.claude_home.join("projects"))
    }
}

impl Config {
    /// Load configuration from defaults, file, and environment
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        let mut config_paths = Vec::new();
        if let Ok(explicit) = env::var("CCSTATS_CONFIG") {
            config_paths.push(PathBuf::from(explicit));
        }
        config_paths.push(PathBuf::from("ccstats.toml"));
        config_paths.push(PathBuf::from(".ccstats.toml"));
        if let Some(dir) = dirs::config_dir() {
            config_paths.push(dir.join("ccstats").join("config.toml"));
        }

        for path in &config_paths {
            if path.exists() {
                config = Self::load_from_file(path)?;
                break;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        if let Ok(val) = env::var("CCSTATS_BUFFER_SIZE_KB") {
            self.processing.buffer_size_kb = val.parse().context("Invalid CCSTATS_BUFFER_SIZE_KB")?;
        }
        if let Ok(val) = env::var("CCSTATS_MAX_LINE_MB") {
            self.processing.max_line_mb = val.parse().context("Invalid CCSTATS_MAX_LINE_MB")?;
        }

        if let Ok(val) = env::var("CLAUDE_HOME") {
            self.paths.claude_home = PathBuf::from(val);
        }
        if let Ok(val) = env::var("CCSTATS_DATA_PATH") {
            self.paths.data_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = env::var("CCSTATS_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(anyhow::anyhow!(
                "Log format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            ));
        }

        if !matches!(self.logging.output.as_str(), "console" | "file" | "both") {
            return Err(anyhow::anyhow!(
                "Log output must be \"console\", \"file\" or \"both\", got {:?}",
                self.logging.output
            ));
        }

        if self.processing.buffer_size_kb < 1 || self.processing.buffer_size_kb > 1024 {
            return Err(anyhow::anyhow!(
                "Buffer size must be between 1KB and 1024KB, got {}KB",
                self.processing.buffer_size_kb
            ));
        }

        if self.processing.max_line_mb < MIN_MAX_LINE_MB {
            return Err(anyhow::anyhow!(
                "Max line size must be at least {}MB, got {}MB",
                MIN_MAX_LINE_MB,
                self.processing.max_line_mb
            ));
        }

        if self.processing.log_suffix.is_empty() {
            return Err(anyhow::anyhow!("Log file suffix cannot be empty"));
        }

        if self.output.session_width < 4 {
            return Err(anyhow::anyhow!(
                "Session column width must be at least 4, got {}",
                self.output.session_width
            ));
        }

        if self.logging.output != "console" && !self.paths.log_directory.exists() {
            fs::create_dir_all(&self.paths.log_directory)
                .context("Failed to create log directory")?;
        }

        Ok(())
    }
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load the configuration once and install it as the global instance
pub fn init_config() -> Result<&'static Config> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = Config::load()?;
    Ok(CONFIG.get_or_init(|| config))
}
