//! Add tool definition.

use super::{BinaryParams, ToolDefinition, common::format_infix};
use crate::domains::tools::ToolError;

/// Add tool - sums two numbers.
pub struct AddTool;

impl AddTool {
    /// Pure operation.
    pub fn compute(a: f64, b: f64) -> f64 {
        a + b
    }
}

impl ToolDefinition for AddTool {
    const NAME: &'static str = "add";
    const DESCRIPTION: &'static str = "Add two numbers together";

    type Params = BinaryParams;

    fn evaluate(params: &BinaryParams) -> Result<String, ToolError> {
        let result = Self::compute(params.a, params.b);
        Ok(format_infix(params.a, "+", params.b, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_evaluate() {
        let text = AddTool::evaluate(&BinaryParams { a: 5.0, b: 3.0 }).unwrap();
        assert_eq!(text, "5 + 3 = 8");
    }

    #[test]
    fn test_add_fractional_and_negative() {
        let text = AddTool::evaluate(&BinaryParams { a: -1.5, b: 0.25 }).unwrap();
        assert_eq!(text, "-1.5 + 0.25 = -1.25");
    }
}
