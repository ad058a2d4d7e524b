//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// Populated once at startup and handed to the handlers through router state.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Site Identity ===
    /// Site identifier reported in deploy records.
    #[serde(default = "default_site_id")]
    pub site_id: String,

    /// Human-readable site name reported in deploy records.
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Deployment environment (read from `CONTEXT`).
    #[serde(rename = "context", default = "default_environment")]
    pub environment: String,

    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

fn default_site_id() -> String {
    "unknown".to_string()
}

fn default_site_name() -> String {
    "unknown".to_string()
}

fn default_environment() -> String {
    "production".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_id: default_site_id(),
            site_name: default_site_name(),
            environment: default_environment(),
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env::<Self>().map(Self::with_blank_defaults)
    }

    /// Load configuration from explicit key/value pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Self>(pairs).map(Self::with_blank_defaults)
    }

    /// Replace variables that were set but left blank with their defaults.
    fn with_blank_defaults(mut self) -> Self {
        fn fill(value: &mut String, default: fn() -> String) {
            if value.trim().is_empty() {
                *value = default();
            }
        }

        fill(&mut self.site_id, default_site_id);
        fill(&mut self.site_name, default_site_name);
        fill(&mut self.environment, default_environment);
        fill(&mut self.host, default_host);
        fill(&mut self.rust_log, default_log_level);
        self
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be greater than 0".to_string());
        }

        if self.host.parse::<IpAddr>().is_err() {
            return Err(format!("HOST is not a valid IP address: {}", self.host));
        }

        Ok(())
    }

    /// Socket address for the HTTP listener.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.host
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.port))
            .map_err(|e| format!("invalid HOST {}: {}", self.host, e))
    }
}
