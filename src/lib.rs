//! Calculator MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing six
//! arithmetic tools: add, subtract, multiply, divide, power and sqrt.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the rmcp server handler and
//!   the transports (STDIO and HTTP/SSE)
//! - **domains**: business logic
//!   - **tools**: the tool catalog, the dispatcher and one definition per tool
//!
//! # Example
//!
//! ```rust,no_run
//! use calculator_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
pub use domains::tools::{ErrorKind, ToolError, ToolRegistry, ToolResult};
