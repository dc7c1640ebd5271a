use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::ConfigError;
use crate::query_options::{DnsQueryOptions, DEFAULT_TRIES};
use crate::server_endpoint::ServerEndpoint;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub servers: Vec<String>,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_tries")]
    pub tries: usize,

    #[serde(default = "default_false")]
    pub tcp_only: bool,

    #[serde(default = "default_false")]
    pub parallel_queries: bool,

    #[serde(default = "default_true")]
    pub recursion_desired: bool,

    #[serde(default)]
    pub edns_buffer_size: Option<u16>,

    #[serde(default = "default_false")]
    pub dnssec_ok: bool,

    #[serde(default = "default_false")]
    pub checking_disabled: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            servers: vec![],
            query_timeout_ms: default_query_timeout_ms(),
            tries: default_tries(),
            tcp_only: false,
            parallel_queries: false,
            recursion_desired: true,
            edns_buffer_size: None,
            dnssec_ok: false,
            checking_disabled: false,
        }
    }
}

impl ResolverConfig {
    pub fn query_options(&self) -> DnsQueryOptions {
        DnsQueryOptions {
            recursion_desired: self.recursion_desired,
            tcp_only: self.tcp_only,
            query_timeout: Duration::from_millis(self.query_timeout_ms),
            tries: self.tries,
            parallel_queries: self.parallel_queries,
            edns_buffer_size: self.edns_buffer_size,
            dnssec_ok: self.dnssec_ok,
            checking_disabled: self.checking_disabled,
        }
    }

    pub fn endpoints(&self) -> Result<Vec<ServerEndpoint>, ConfigError> {
        self.servers
            .iter()
            .map(|s| {
                s.parse::<ServerEndpoint>()
                    .map_err(|e| ConfigError::Validation(e.to_string()))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tries == 0 {
            return Err(ConfigError::Validation("tries must be at least 1".into()));
        }
        if self.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms must be greater than 0".into(),
            ));
        }
        if let Some(size) = self.edns_buffer_size {
            if size < 512 {
                return Err(ConfigError::Validation(format!(
                    "edns_buffer_size {} is below the 512 byte minimum",
                    size
                )));
            }
        }
        self.endpoints()?;
        Ok(())
    }
}

fn default_query_timeout_ms() -> u64 {
    10_000
}

fn default_tries() -> usize {
    DEFAULT_TRIES
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}
