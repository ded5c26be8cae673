//! Tool definitions module.
//!
//! Each tool is defined in its own file with:
//! - A typed parameters struct (its JSON Schema is the advertised input schema)
//! - Name and description constants
//! - A pure `evaluate()` producing the display text
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file (e.g., `modulo.rs`)
//! 2. Implement the `ToolDefinition` trait
//! 3. Export it here
//! 4. Register it in `registry.rs` (catalog and dispatch)

pub mod add;
pub mod common;
pub mod divide;
pub mod multiply;
pub mod power;
pub mod sqrt;
pub mod subtract;

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::error::ToolError;

pub use add::AddTool;
pub use common::{BinaryParams, parse_params};
pub use divide::DivideTool;
pub use multiply::MultiplyTool;
pub use power::{PowerParams, PowerTool};
pub use sqrt::{SqrtParams, SqrtTool};
pub use subtract::SubtractTool;

/// Trait for tool definitions.
///
/// Each tool must implement this trait to provide its metadata and logic.
pub trait ToolDefinition {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed parameters; their schema is the tool's input schema.
    type Params: DeserializeOwned + JsonSchema + 'static;

    /// Evaluate the tool and format the display text.
    fn evaluate(params: &Self::Params) -> Result<String, ToolError>;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Parse raw arguments and evaluate.
    fn run(arguments: JsonObject) -> Result<String, ToolError> {
        let params = parse_params::<Self::Params>(arguments)?;
        Self::evaluate(&params)
    }
}
