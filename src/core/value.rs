//! 样式值：统一使用 serde_json::Value 表示任意样式取值

pub use serde_json::{Map, Value};

/// name → value map of style values, as sent to the display bridge.
pub type StyleMap = Map<String, Value>;

/// Human-readable type name of a value, for diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds a single-entry style map.
pub fn single(name: &str, value: Value) -> StyleMap {
    let mut map = StyleMap::new();
    map.insert(name.to_string(), value);
    map
}
