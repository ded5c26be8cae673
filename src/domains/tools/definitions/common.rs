//! Common utilities shared across the arithmetic tools.
//!
//! This module provides the shared two-operand parameter struct, argument
//! parsing, and display formatting.

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, de::DeserializeOwned};

use crate::domains::tools::ToolError;

/// Parameters for the two-operand tools (add, subtract, multiply, divide).
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
pub struct BinaryParams {
    /// First number
    pub a: f64,

    /// Second number
    pub b: f64,
}

/// Deserialize raw tool arguments into a typed parameters struct.
///
/// Missing or non-numeric fields are rejected up front as invalid arguments.
pub fn parse_params<T: DeserializeOwned>(arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_argument(format!("Invalid arguments: {}", e)))
}

/// Format an infix operation as `"<a> <symbol> <b> = <result>"`.
pub fn format_infix(a: f64, symbol: &str, b: f64, result: f64) -> String {
    format!("{} {} {} = {}", a, symbol, b, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_params_accepts_integers() {
        let params: BinaryParams = parse_params(object(json!({ "a": 5, "b": 3 }))).unwrap();
        assert_eq!(params.a, 5.0);
        assert_eq!(params.b, 3.0);
    }

    #[test]
    fn test_parse_params_ignores_extra_fields() {
        let params: BinaryParams =
            parse_params(object(json!({ "a": 1.5, "b": 2, "note": "x" }))).unwrap();
        assert_eq!(params.a, 1.5);
    }

    #[test]
    fn test_parse_params_missing_field() {
        let err = parse_params::<BinaryParams>(object(json!({ "a": 1 }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
        assert!(err.to_string().contains("missing field `b`"));
    }

    #[test]
    fn test_parse_params_non_numeric() {
        let err = parse_params::<BinaryParams>(object(json!({ "a": "one", "b": 2 }))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
    }

    #[test]
    fn test_format_infix_uses_default_float_display() {
        assert_eq!(format_infix(5.0, "+", 3.0, 8.0), "5 + 3 = 8");
        assert_eq!(format_infix(1.0, "÷", 4.0, 0.25), "1 ÷ 4 = 0.25");
    }
}
