//! Multiply tool definition.

use super::{BinaryParams, ToolDefinition, common::format_infix};
use crate::domains::tools::ToolError;

/// Multiply tool - multiplies two numbers.
pub struct MultiplyTool;

impl MultiplyTool {
    pub fn compute(a: f64, b: f64) -> f64 {
        a * b
    }
}

impl ToolDefinition for MultiplyTool {
    const NAME: &'static str = "multiply";
    const DESCRIPTION: &'static str = "Multiply two numbers";

    type Params = BinaryParams;

    fn evaluate(params: &BinaryParams) -> Result<String, ToolError> {
        let result = Self::compute(params.a, params.b);
        Ok(format_infix(params.a, "×", params.b, result))
    }
}
