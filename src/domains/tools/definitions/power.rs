//! Power tool definition.

use schemars::JsonSchema;
use serde::Deserialize;

use super::ToolDefinition;
use crate::domains::tools::ToolError;

/// Parameters for the power tool.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
pub struct PowerParams {
    /// Base number
    pub base: f64,

    /// Exponent (may be negative or fractional)
    pub exponent: f64,
}

/// Power tool - raises a base to an exponent.
///
/// Undefined cases (negative base with a fractional exponent) yield `NaN`
/// rather than an error.
pub struct PowerTool;

impl PowerTool {
    pub fn compute(base: f64, exponent: f64) -> f64 {
        base.powf(exponent)
    }
}

impl ToolDefinition for PowerTool {
    const NAME: &'static str = "power";
    const DESCRIPTION: &'static str = "Raise a base number to the power of an exponent";

    type Params = PowerParams;

    fn evaluate(params: &PowerParams) -> Result<String, ToolError> {
        let result = Self::compute(params.base, params.exponent);
        Ok(format!("{}^{} = {}", params.base, params.exponent, result))
    }
}
