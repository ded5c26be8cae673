//! Transport configuration types.

use serde::{Deserialize, Serialize};

#[cfg(feature = "http")]
use tracing::warn;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport with JSON-RPC over POST and SSE sessions.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,

    /// Seconds between keep-alive comments on open SSE streams.
    #[serde(default = "default_keep_alive_secs")]
    pub sse_keep_alive_secs: u64,
}

/// Routes the HTTP transport always serves; the JSON-RPC path may not reuse them.
#[cfg(feature = "http")]
pub const RESERVED_PATHS: &[&str] = &["/", "/status", "/health", "/sse", "/messages", "/tools", "/tools/call"];

#[cfg(feature = "http")]
fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[cfg(feature = "http")]
fn default_port() -> u16 {
    8000
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

#[cfg(feature = "http")]
fn default_keep_alive_secs() -> u64 {
    15
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
            sse_keep_alive_secs: default_keep_alive_secs(),
        }
    }
}

/// Read the first variable that is set, in order.
#[cfg(feature = "http")]
fn first_env(names: &[&str]) -> Option<(String, String)> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
}

/// Parse a numeric variable, falling back to `default` with a warning.
#[cfg(feature = "http")]
fn parse_env<T: std::str::FromStr + std::fmt::Display>(names: &[&str], default: T) -> T {
    match first_env(names) {
        Some((name, raw)) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value {:?} for {}, using {}", raw, name, default);
            default
        }),
        None => default,
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Load HTTP settings from the environment.
    ///
    /// `MCP_HTTP_HOST`/`MCP_HTTP_PORT` take precedence over the plain
    /// `HOST`/`PORT` variables set by most container platforms.
    pub fn from_env() -> Self {
        let host = first_env(&["MCP_HTTP_HOST", "HOST"])
            .map(|(_, v)| v)
            .unwrap_or_else(default_host);
        let port = parse_env(&["MCP_HTTP_PORT", "PORT"], default_port());
        let rpc_path = std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_rpc_path());
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);
        let sse_keep_alive_secs =
            parse_env(&["MCP_SSE_KEEPALIVE_SECS"], default_keep_alive_secs());

        Self {
            port,
            host,
            rpc_path,
            enable_cors,
            sse_keep_alive_secs,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TransportConfig {
    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    ///
    /// `MCP_TRANSPORT` selects the transport (`stdio` or `http`).
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "http")]
            "http" | "sse" => Self::Http(HttpConfig::from_env()),
            #[cfg(feature = "stdio")]
            _ => Self::Stdio,
            #[cfg(all(not(feature = "stdio"), feature = "http"))]
            _ => Self::Http(HttpConfig::from_env()),
        }
    }

    /// Check the settings for values the transport cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => Ok(()),
            #[cfg(feature = "http")]
            Self::Http(cfg) => {
                if !cfg.rpc_path.starts_with('/') {
                    return Err(format!("HTTP path must start with '/': {}", cfg.rpc_path));
                }
                if RESERVED_PATHS.contains(&cfg.rpc_path.as_str()) {
                    return Err(format!("HTTP path {} is reserved", cfg.rpc_path));
                }
                if cfg.sse_keep_alive_secs == 0 {
                    return Err("SSE keep-alive interval must be at least 1 second".to_string());
                }
                Ok(())
            }
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}
