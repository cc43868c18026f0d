//! Helpers for reading strategy parameters out of a `serde_json::Value` object.
//!
//! The `param_*` readers never fail: a missing key or a value of the wrong
//! type yields the default. [`ensure_number`] is the strict counterpart used
//! when a caller wants mistyped input reported instead of silently replaced.

use crate::error::StrollError;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only non-negative integers are accepted.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Fails with [`StrollError::ParamTypeMismatch`] if `params[name]` is present
/// but not a JSON number. A missing key is fine.
pub fn ensure_number(params: &Value, name: &str) -> Result<(), StrollError> {
    match params.get(name) {
        None => Ok(()),
        Some(v) if v.is_number() => Ok(()),
        Some(v) => Err(StrollError::ParamTypeMismatch {
            name: name.to_owned(),
            expected: "number".to_owned(),
            got: json_type_name(v).to_owned(),
        }),
    }
}

/// Short JSON type name used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"step_fraction": 0.5});
        assert!((param_f64(&params, "step_fraction", 1.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"step_fraction": 2});
        assert!((param_f64(&params, "step_fraction", 1.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing_or_mistyped() {
        assert!((param_f64(&json!({}), "x", 3.0) - 3.0).abs() < f64::EPSILON);
        assert!((param_f64(&json!({"x": "fast"}), "x", 1.0) - 1.0).abs() < f64::EPSILON);
        assert!((param_f64(&json!({"x": null}), "x", 5.0) - 5.0).abs() < f64::EPSILON);
        assert!((param_f64(&json!("nope"), "x", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_usize_extracts_existing_integer() {
        assert_eq!(param_usize(&json!({"max_retries": 4}), "max_retries", 10), 4);
    }

    #[test]
    fn param_usize_rejects_floats_and_negatives() {
        assert_eq!(param_usize(&json!({"n": 2.5}), "n", 99), 99);
        assert_eq!(param_usize(&json!({"n": -1}), "n", 5), 5);
        assert_eq!(param_usize(&json!({"n": "many"}), "n", 8), 8);
    }

    #[test]
    fn ensure_number_accepts_missing_and_numeric() {
        assert!(ensure_number(&json!({}), "min_reflection").is_ok());
        assert!(ensure_number(&json!({"min_reflection": 0.4}), "min_reflection").is_ok());
        assert!(ensure_number(&json!({"min_reflection": 3}), "min_reflection").is_ok());
    }

    #[test]
    fn ensure_number_reports_actual_type() {
        let err = ensure_number(&json!({"min_reflection": "high"}), "min_reflection")
            .unwrap_err();
        match err {
            StrollError::ParamTypeMismatch {
                name,
                expected,
                got,
            } => {
                assert_eq!(name, "min_reflection");
                assert_eq!(expected, "number");
                assert_eq!(got, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_type_name_covers_all_variants() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!([1])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
