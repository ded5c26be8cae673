//! Tool Registry - the tool catalog and the dispatcher.
//!
//! This module provides:
//! - The ordered catalog of all available tools
//! - Dispatch of a tool call (name + arguments) to its definition
//!
//! Both transports use this registry, so the catalog and dispatch are
//! defined once. Each name in `tool_names()` must have a dispatch arm in
//! `call_tool()` and an entry in `get_all_tools()`.

use rmcp::model::{JsonObject, Tool};
use tracing::{info, instrument, warn};

use super::definitions::{
    AddTool, DivideTool, MultiplyTool, PowerTool, SqrtTool, SubtractTool, ToolDefinition,
};
use super::error::ToolError;

/// Outcome of a single tool invocation: the display text or a classified failure.
pub type ToolResult = Result<String, ToolError>;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Stateless: every call is independent, so one registry can be shared by
/// any number of concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolRegistry;

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new() -> Self {
        Self
    }

    /// Get all tool names, in catalog order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            AddTool::NAME,
            SubtractTool::NAME,
            MultiplyTool::NAME,
            DivideTool::NAME,
            PowerTool::NAME,
            SqrtTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for the advertised catalog.
    pub fn get_all_tools(&self) -> Vec<Tool> {
        vec![
            AddTool::to_tool(),
            SubtractTool::to_tool(),
            MultiplyTool::to_tool(),
            DivideTool::to_tool(),
            PowerTool::to_tool(),
            SqrtTool::to_tool(),
        ]
    }

    /// Check whether a tool name is in the catalog (exact, case-sensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.tool_names().contains(&name)
    }

    /// Dispatch a tool call to the appropriate definition.
    #[instrument(skip(self, arguments))]
    pub fn call_tool(&self, name: &str, arguments: JsonObject) -> ToolResult {
        let result = match name {
            AddTool::NAME => AddTool::run(arguments),
            SubtractTool::NAME => SubtractTool::run(arguments),
            MultiplyTool::NAME => MultiplyTool::run(arguments),
            DivideTool::NAME => DivideTool::run(arguments),
            PowerTool::NAME => PowerTool::run(arguments),
            SqrtTool::NAME => SqrtTool::run(arguments),
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };

        match &result {
            Ok(text) => info!("Tool {} succeeded: {}", name, text),
            Err(e) => warn!("Tool {} failed: {}", name, e),
        }

        result
    }

    /// Dispatch a tool call whose arguments are an arbitrary JSON value.
    ///
    /// `null` is treated as no arguments; any other non-object is rejected.
    pub fn call_tool_value(&self, name: &str, arguments: serde_json::Value) -> ToolResult {
        match arguments {
            serde_json::Value::Object(map) => self.call_tool(name, map),
            serde_json::Value::Null => self.call_tool(name, JsonObject::new()),
            other => {
                if !self.contains(name) {
                    return Err(ToolError::not_found(name));
                }
                Err(ToolError::invalid_argument(format!(
                    "Invalid arguments: expected an object, got {}",
                    other
                )))
            }
        }
    }
}
