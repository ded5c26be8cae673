//! Divide tool definition.
//!
//! The only two-operand tool with a precondition: the divisor must be non-zero.

use tracing::warn;

use super::{BinaryParams, ToolDefinition, common::format_infix};
use crate::domains::tools::ToolError;

/// Message returned when the divisor is zero.
pub const DIVIDE_BY_ZERO: &str = "Cannot divide by zero";

/// Divide tool - divides the first number by the second.
pub struct DivideTool;

impl DivideTool {
    /// Divide `a` by `b`, rejecting a zero divisor (including `-0.0`).
    pub fn compute(a: f64, b: f64) -> Result<f64, ToolError> {
        if b == 0.0 {
            warn!("Rejected division of {} by zero", a);
            return Err(ToolError::invalid_argument(DIVIDE_BY_ZERO));
        }
        Ok(a / b)
    }
}

impl ToolDefinition for DivideTool {
    const NAME: &'static str = "divide";
    const DESCRIPTION: &'static str = "Divide the first number by the second. Fails if the divisor is zero.";

    type Params = BinaryParams;

    fn evaluate(params: &BinaryParams) -> Result<String, ToolError> {
        let result = Self::compute(params.a, params.b)?;
        Ok(format_infix(params.a, "÷", params.b, result))
    }
}
