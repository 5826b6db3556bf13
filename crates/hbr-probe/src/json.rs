//! Plain JSON and newline-delimited JSON.

use serde_json::Value;

use crate::route::Miss;
use crate::tick::{self, Tick};

/// Parse an array of maps, or an object whose `ticks` field is one.
///
/// When the bytes do not parse or have another shape, parsing is
/// retried once from the first `{` if that is not the first byte.
pub(crate) fn ticks(bytes: &[u8]) -> Result<Vec<Tick>, Miss> {
    match parse(bytes) {
        Ok(ticks) => Ok(ticks),
        Err(miss) => match bytes.iter().position(|&b| b == b'{') {
            Some(start) if start > 0 => parse(&bytes[start..]),
            _ => Err(miss),
        },
    }
}

fn parse(bytes: &[u8]) -> Result<Vec<Tick>, Miss> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| Miss::Syntax(e.to_string()))?;
    match value {
        Value::Array(items) => tick::from_values(items),
        Value::Object(mut map) => match map.remove("ticks") {
            Some(Value::Array(items)) => tick::from_values(items),
            Some(other) => Err(Miss::Shape(tick::kind(&other))),
            None => Err(Miss::Shape("object without ticks")),
        },
        other => Err(Miss::Shape(tick::kind(&other))),
    }
}

/// Parse one map per non-blank line.
pub(crate) fn ndjson(bytes: &[u8]) -> Result<Vec<Tick>, Miss> {
    let ticks = bytes
        .split(|&b| b == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_slice::<Value>(line)
                .map_err(|e| Miss::Syntax(e.to_string()))
                .and_then(tick::from_value)
        })
        .collect::<Result<Vec<_>, _>>()?;
    if ticks.is_empty() {
        return Err(Miss::Empty);
    }
    Ok(ticks)
}
