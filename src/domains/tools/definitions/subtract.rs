//! Subtract tool definition.

use super::{BinaryParams, ToolDefinition, common::format_infix};
use crate::domains::tools::ToolError;

/// Subtract tool - subtracts the second number from the first.
pub struct SubtractTool;

impl SubtractTool {
    pub fn compute(a: f64, b: f64) -> f64 {
        a - b
    }
}

impl ToolDefinition for SubtractTool {
    const NAME: &'static str = "subtract";
    const DESCRIPTION: &'static str = "Subtract the second number from the first";

    type Params = BinaryParams;

    fn evaluate(params: &BinaryParams) -> Result<String, ToolError> {
        let result = Self::compute(params.a, params.b);
        Ok(format_infix(params.a, "-", params.b, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract_evaluate() {
        let text = SubtractTool::evaluate(&BinaryParams { a: 10.0, b: 4.0 }).unwrap();
        assert_eq!(text, "10 - 4 = 6");
    }

    #[test]
    fn test_subtract_negative_result() {
        let text = SubtractTool::evaluate(&BinaryParams { a: 3.0, b: 5.0 }).unwrap();
        assert_eq!(text, "3 - 5 = -2");
    }
}
