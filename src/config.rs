use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

use crate::http::buffer::BufferLimits;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:42069";
const DEFAULT_READ_BUFFER_SIZE: usize = 1024;
const DEFAULT_MAX_BUFFER_SIZE: usize = 1024 * 1024;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_PATH_ENV: &str = "HTTPFROMTCP_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Initial size of each connection's staging buffer.
    pub read_buffer_size: usize,
    /// Most bytes a connection may hold before the parser consumes them.
    /// A request line or header line longer than this is rejected.
    pub max_buffer_size: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` to read environment variables.
    ///
    /// Defaults, then the YAML file named by `HTTPFROMTCP_CONFIG`, then the
    /// `LISTEN` and `LOG_LEVEL` overrides.
    pub fn load_from<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            cfg.log_level = level;
        }

        cfg.read_buffer_size = cfg.read_buffer_size.max(1);
        cfg.max_buffer_size = cfg.max_buffer_size.max(cfg.read_buffer_size);
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(contents: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(contents)?;
        Ok(cfg)
    }

    pub fn buffer_limits(&self) -> BufferLimits {
        BufferLimits::new(self.read_buffer_size, self.max_buffer_size)
    }

    /// The configured log level, falling back to INFO if it doesn't parse.
    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.log_level).unwrap_or(tracing::Level::INFO)
    }
}
