use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-resolv.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-resolv/config.toml";

/// Main configuration structure for ferrous-resolv
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-resolv.toml in current directory
    /// 3. /etc/ferrous-resolv/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if !overrides.servers.is_empty() {
            self.resolver.servers = overrides.servers;
        }
        if let Some(timeout) = overrides.query_timeout_ms {
            self.resolver.query_timeout_ms = timeout;
        }
        if let Some(tries) = overrides.tries {
            self.resolver.tries = tries;
        }
        if overrides.tcp_only {
            self.resolver.tcp_only = true;
        }
        if overrides.parallel_queries {
            self.resolver.parallel_queries = true;
        }
        if overrides.no_recursion {
            self.resolver.recursion_desired = false;
        }
        if let Some(size) = overrides.edns_buffer_size {
            self.resolver.edns_buffer_size = Some(size);
        }
        if overrides.dnssec_ok {
            self.resolver.dnssec_ok = true;
        }
        if overrides.checking_disabled {
            self.resolver.checking_disabled = true;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No name servers configured".to_string(),
            ));
        }
        self.resolver.validate()
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub servers: Vec<String>,
    pub query_timeout_ms: Option<u64>,
    pub tries: Option<usize>,
    pub tcp_only: bool,
    pub parallel_queries: bool,
    pub no_recursion: bool,
    pub edns_buffer_size: Option<u16>,
    pub dnssec_ok: bool,
    pub checking_disabled: bool,
    pub log_level: Option<String>,
}
