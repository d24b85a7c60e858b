//! Tolerant field access on raw source documents.
//!
//! Source files carry no enforced schema. Aggregators read only the fields they
//! need and treat an absent or mistyped field as empty (strings) or zero (numbers).

use serde_json::Value;

/// One parsed source file. Any JSON value is accepted; objects are the norm.
pub type RawDocument = Value;

/// Read-only accessors used by the aggregators.
pub trait DocumentExt {
    /// String field, or `""` when missing or not a string.
    fn str_field(&self, key: &str) -> &str;

    /// First non-empty string among `keys`, or `""`.
    fn first_str_field(&self, keys: &[&str]) -> &str;

    /// Field rendered as display text: strings as-is, numbers and booleans
    /// through their JSON form, everything else `""`.
    fn text_field(&self, key: &str) -> String;

    /// Integer field. Floats are truncated and decimal strings such as `"137"`
    /// are parsed; anything else is `None`.
    fn int_field(&self, key: &str) -> Option<i64>;

    /// Field value when present and not `null`.
    fn present_field(&self, key: &str) -> Option<&Value>;

    /// Length of an array field, `0` when missing or not an array.
    fn array_len(&self, key: &str) -> usize;
}

impl DocumentExt for Value {
    fn str_field(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }

    fn first_str_field(&self, keys: &[&str]) -> &str {
        keys.iter()
            .map(|key| self.str_field(key))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }

    fn text_field(&self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
            _ => String::new(),
        }
    }

    fn int_field(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        value
            .as_i64()
            .or_else(|| value.as_u64().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
            .or_else(|| value.as_f64().map(|f| f as i64))
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    }

    fn present_field(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|value| !value.is_null())
    }

    fn array_len(&self, key: &str) -> usize {
        self.get(key).and_then(Value::as_array).map_or(0, Vec::len)
    }
}
