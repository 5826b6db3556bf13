//! Generic tick records.

use indexmap::IndexMap;
use serde_json::Value;

use crate::route::Miss;

/// One record from a loose dump: string keys in source order.
pub type Tick = IndexMap<String, Value>;

/// Convert a decoded value into a tick, rejecting anything but a map.
pub(crate) fn from_value(value: Value) -> Result<Tick, Miss> {
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(Miss::Shape(kind(&other))),
    }
}

/// Convert a sequence of values, failing on the first non-map.
pub(crate) fn from_values(values: impl IntoIterator<Item = Value>) -> Result<Vec<Tick>, Miss> {
    values.into_iter().map(from_value).collect()
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
