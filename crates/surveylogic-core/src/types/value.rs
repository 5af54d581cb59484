//! Rule values
//!
//! Rule values are kept as JSON values so that whatever the wire expression
//! carries (strings, integers, floats, arrays) survives a round trip untouched.
//! The helpers here answer the shape questions the codec and the editor ask.

pub use serde_json::Value;

/// Returns true if `value` counts as "filled in" for a single-value operator.
///
/// `null` and the empty string are not filled; an array is filled when at
/// least one of its elements is.
pub fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => items.iter().any(is_filled),
        _ => true,
    }
}

/// Returns the two ends of a range value, if `value` is a two-element array
/// with both ends filled.
pub fn as_range(value: &Value) -> Option<(&Value, &Value)> {
    match value.as_array().map(Vec::as_slice) {
        Some([min, max]) if is_filled(min) && is_filled(max) => Some((min, max)),
        _ => None,
    }
}

/// Coerces a value to an array, wrapping scalars in a one-element array.
pub fn to_array(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_filled() {
        assert!(!is_filled(&Value::Null));
        assert!(!is_filled(&json!("")));
        assert!(!is_filled(&json!([])));
        assert!(is_filled(&json!("x")));
        assert!(is_filled(&json!(0)));
        assert!(is_filled(&json!(false)));
        assert!(is_filled(&json!(["a"])));
        assert!(is_filled(&json!(["", "a"])));
        assert!(!is_filled(&json!([""])));
        assert!(!is_filled(&json!([null, ""])));
    }

    #[test]
    fn test_as_range() {
        let value = json!([1, 10]);
        assert_eq!(as_range(&value), Some((&json!(1), &json!(10))));
        assert_eq!(as_range(&json!([1])), None);
        assert_eq!(as_range(&json!([1, null])), None);
        assert_eq!(as_range(&json!([1, 2, 3])), None);
        assert_eq!(as_range(&json!("1-10")), None);
    }

    #[test]
    fn test_to_array() {
        assert_eq!(to_array(&json!("A1")), vec![json!("A1")]);
        assert_eq!(to_array(&json!(["A1", "A2"])), vec![json!("A1"), json!("A2")]);
        assert!(to_array(&Value::Null).is_empty());
    }
}
