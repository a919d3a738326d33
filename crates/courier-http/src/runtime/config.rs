//! # Environment-Based Configuration
//!
//! Runtime settings are loaded from environment variables so deployments can
//! change them without a rebuild.
//!
//! ## Environment Variables
//!
//! - `COURIER_BIND_ADDR` - Listen address (default: 0.0.0.0:8080)
//! - `COURIER_MAX_BODY_SIZE` - Maximum inbound request body size in bytes (default: 1048576 / 1MB)
//! - `COURIER_ENABLE_CORS` - Enable permissive CORS (default: true)
//! - `COURIER_OUTBOUND_TIMEOUT_SECS` - Total timeout for outbound tool requests (default: unset)
//! - `COURIER_OUTBOUND_CONNECT_TIMEOUT_SECS` - Connect timeout for outbound tool requests (default: unset)
//! - `COURIER_LOG_FORMAT` - `json` or `pretty` (default: json)

use courier_tools::ExecutorConfig;
use std::{env, fmt, net::SocketAddr, str::FromStr, time::Duration};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Output format of the log subscriber installed by the server binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{other}', expected json or pretty")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => f.write_str("json"),
            LogFormat::Pretty => f.write_str("pretty"),
        }
    }
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub bind_addr: SocketAddr,
    pub max_body_size: usize,
    pub enable_cors: bool,
    pub outbound_timeout: Option<Duration>,
    pub outbound_connect_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            enable_cors: true,
            outbound_timeout: None,
            outbound_connect_timeout: None,
            log_format: LogFormat::Json,
        }
    }
}

impl RuntimeConfig {
    /// Transport settings for the outbound request executor.
    pub fn executor_config(&self) -> ExecutorConfig {
        let mut config = ExecutorConfig::new();
        if let Some(timeout) = self.outbound_timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(timeout) = self.outbound_connect_timeout {
            config = config.with_connect_timeout(timeout);
        }
        config
    }
}

/// Builder for [`RuntimeConfig`] with environment variable support
#[derive(Debug, Clone)]
pub struct RuntimeConfigBuilder {
    bind_addr: String,
    max_body_size: usize,
    enable_cors: bool,
    outbound_timeout_secs: Option<u64>,
    outbound_connect_timeout_secs: Option<u64>,
    log_format: LogFormat,
}

impl Default for RuntimeConfigBuilder {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            enable_cors: true,
            outbound_timeout_secs: None,
            outbound_connect_timeout_secs: None,
            log_format: LogFormat::Json,
        }
    }
}

impl RuntimeConfigBuilder {
    /// Create a new builder with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if any variable has a value that
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::default();

        if let Some(addr) = get_env_string("COURIER_BIND_ADDR") {
            builder = builder.bind_addr(addr);
        }
        if let Some(max_size) = get_env_usize("COURIER_MAX_BODY_SIZE")? {
            builder = builder.max_body_size(max_size);
        }
        if let Some(cors) = get_env_bool("COURIER_ENABLE_CORS")? {
            builder = builder.enable_cors(cors);
        }
        if let Some(timeout) = get_env_u64("COURIER_OUTBOUND_TIMEOUT_SECS")? {
            builder = builder.outbound_timeout_secs(timeout);
        }
        if let Some(timeout) = get_env_u64("COURIER_OUTBOUND_CONNECT_TIMEOUT_SECS")? {
            builder = builder.outbound_connect_timeout_secs(timeout);
        }
        if let Some(format) = get_env_string("COURIER_LOG_FORMAT") {
            let format = format
                .parse::<LogFormat>()
                .map_err(|message| ConfigError::InvalidEnvVar {
                    key: "COURIER_LOG_FORMAT".to_string(),
                    message,
                })?;
            builder = builder.log_format(format);
        }

        Ok(builder)
    }

    /// Set the listen address
    #[must_use]
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Set maximum request body size in bytes
    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Enable or disable CORS
    #[must_use]
    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    /// Set the total timeout for outbound requests in seconds
    #[must_use]
    pub fn outbound_timeout_secs(mut self, timeout: u64) -> Self {
        self.outbound_timeout_secs = Some(timeout);
        self
    }

    /// Set the connect timeout for outbound requests in seconds
    #[must_use]
    pub fn outbound_connect_timeout_secs(mut self, timeout: u64) -> Self {
        self.outbound_connect_timeout_secs = Some(timeout);
        self
    }

    /// Set the log output format
    #[must_use]
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Validate configuration and build [`RuntimeConfig`]
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the configuration is invalid.
    pub fn build(self) -> Result<RuntimeConfig, ConfigError> {
        self.validate()?;

        let bind_addr = self.bind_addr.parse::<SocketAddr>().map_err(|e| {
            ConfigError::ValidationError(format!("bind_addr '{}' is invalid: {e}", self.bind_addr))
        })?;

        Ok(RuntimeConfig {
            bind_addr,
            max_body_size: self.max_body_size,
            enable_cors: self.enable_cors,
            outbound_timeout: self.outbound_timeout_secs.map(Duration::from_secs),
            outbound_connect_timeout: self.outbound_connect_timeout_secs.map(Duration::from_secs),
            log_format: self.log_format,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_size == 0 {
            return Err(ConfigError::ValidationError(
                "max_body_size must be greater than 0".to_string(),
            ));
        }
        if self.outbound_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "outbound_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.outbound_connect_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "outbound_connect_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// Environment variable helper functions

fn get_env_string(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn get_env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(val) => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!(
                    "invalid boolean value '{val}', expected true/false/1/0/yes/no/on/off"
                ),
            }),
        },
        Err(_) => Ok(None),
    }
}

fn get_env_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    match env::var(key) {
        Ok(val) => val
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid u64 value '{val}': {e}"),
            }),
        Err(_) => Ok(None),
    }
}

fn get_env_usize(key: &str) -> Result<Option<usize>, ConfigError> {
    match env::var(key) {
        Ok(val) => val
            .parse::<usize>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid usize value '{val}': {e}"),
            }),
        Err(_) => Ok(None),
    }
}
