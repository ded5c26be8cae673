//! Square root tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::warn;

use super::ToolDefinition;
use crate::domains::tools::ToolError;

/// Message returned for a negative operand.
pub const NEGATIVE_SQRT: &str = "Cannot calculate square root of negative number";

/// Parameters for the square root tool.
///
/// The advertised minimum is advisory; `SqrtTool::compute` enforces it.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
pub struct SqrtParams {
    /// Number to take the square root of (must be non-negative)
    #[schemars(range(min = 0))]
    pub number: f64,
}

/// Square root tool.
pub struct SqrtTool;

impl SqrtTool {
    /// Principal square root, rejecting negative input.
    pub fn compute(number: f64) -> Result<f64, ToolError> {
        if number < 0.0 {
            warn!("Rejected square root of negative number {}", number);
            return Err(ToolError::invalid_argument(NEGATIVE_SQRT));
        }
        Ok(number.sqrt())
    }
}

impl ToolDefinition for SqrtTool {
    const NAME: &'static str = "sqrt";
    const DESCRIPTION: &'static str = "Calculate the square root of a non-negative number";

    type Params = SqrtParams;

    fn evaluate(params: &SqrtParams) -> Result<String, ToolError> {
        let result = Self::compute(params.number)?;
        Ok(format!("√{} = {}", params.number, result))
    }
}
