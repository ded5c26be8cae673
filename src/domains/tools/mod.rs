//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are the arithmetic operations MCP clients can call.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Tool catalog and dispatcher, shared by every transport
//! - `error.rs` - Tool-specific error types and their client-facing kinds
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `modulo.rs`)
//! 2. Implement `ToolDefinition` (params, name, description, evaluate)
//! 3. Export in `definitions/mod.rs`
//! 4. Add it to `tool_names()`, `get_all_tools()` and `call_tool()` in `registry.rs`
//!
//! **No need to modify `server.rs` or the transports!**

pub mod definitions;
mod error;
mod registry;

pub use definitions::ToolDefinition;
pub use error::{ErrorKind, ToolError};
pub use registry::{ToolRegistry, ToolResult};
