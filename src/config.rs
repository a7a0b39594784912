//! Application configuration loaded from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::topology::OutputFormat;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Status Service ===
    /// Deployment environment name echoed by the root endpoint.
    #[serde(default = "default_env")]
    pub env: String,

    /// Interface to bind the HTTP server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub log_json: bool,

    /// Port for the Prometheus exporter. Disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    // === Topology Renderer ===
    /// Directory diagrams are written to.
    #[serde(default = "default_output_dir")]
    pub topology_output_dir: PathBuf,

    /// Diagram format: png, svg, jpg, pdf or dot.
    #[serde(default = "default_format")]
    pub topology_format: String,

    /// Graphviz `dot` binary used to lay out diagrams.
    #[serde(default = "default_graphviz_dot")]
    pub graphviz_dot: String,
}

fn default_env() -> String {
    "development".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_format() -> String {
    "png".to_string()
}

fn default_graphviz_dot() -> String {
    "dot".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: default_env(),
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
            log_json: false,
            metrics_port: None,
            topology_output_dir: default_output_dir(),
            topology_format: default_format(),
            graphviz_dot: default_graphviz_dot(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Load configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                var: "PORT",
                reason: "must be non-zero".to_string(),
            });
        }

        if self.metrics_port == Some(self.port) {
            return Err(ConfigError::Invalid {
                var: "METRICS_PORT",
                reason: format!("collides with PORT {}", self.port),
            });
        }

        self.output_format()?;
        self.bind_addr()?;

        Ok(())
    }

    /// Resolve HOST and PORT into a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| ConfigError::BindAddr { addr, source })
    }

    /// Parsed diagram output format.
    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        OutputFormat::from_str(&self.topology_format).map_err(|_| ConfigError::Invalid {
            var: "TOPOLOGY_FORMAT",
            reason: format!("unsupported format {:?}", self.topology_format),
        })
    }
}
