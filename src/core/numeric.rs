//! Lenient numeric coercion of upstream values.
//!
//! Every place that turns a loosely-typed JSON value into a number goes through
//! [`coerce_finite`], so that "bad data counts as zero" has exactly one definition.

use serde_json::Value;

/// Coerce a JSON value into a finite number.
///
/// Accepts JSON numbers and strings holding a number (surrounding whitespace allowed).
/// Everything else, including `NaN` and infinities, yields [`None`].
#[must_use]
pub fn coerce_finite(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}

/// Coerce a JSON value into a finite number, falling back to zero.
#[must_use]
pub fn to_finite_number_or_zero(value: &Value) -> f64 {
    coerce_finite(value).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(coerce_finite(&json!(10)), Some(10.0));
        assert_eq!(coerce_finite(&json!(-0.25)), Some(-0.25));
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(coerce_finite(&json!("0.2573")), Some(0.2573));
        assert_eq!(coerce_finite(&json!("  12 ")), Some(12.0));
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert_eq!(coerce_finite(&json!("abc")), None);
        assert_eq!(coerce_finite(&json!("")), None);
        assert_eq!(coerce_finite(&json!(null)), None);
        assert_eq!(coerce_finite(&json!(true)), None);
        assert_eq!(coerce_finite(&json!([1])), None);
        assert_eq!(coerce_finite(&json!({"value": 1})), None);
    }

    #[test]
    fn test_rejects_non_finite_strings() {
        assert_eq!(coerce_finite(&json!("NaN")), None);
        assert_eq!(coerce_finite(&json!("inf")), None);
        assert_eq!(coerce_finite(&json!("-infinity")), None);
    }

    #[test]
    fn test_or_zero() {
        assert_eq!(to_finite_number_or_zero(&json!("abc")), 0.0);
        assert_eq!(to_finite_number_or_zero(&json!(null)), 0.0);
        assert_eq!(to_finite_number_or_zero(&json!("3.5")), 3.5);
    }
}
