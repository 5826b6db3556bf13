//! Binary self-describing record streams: msgpack and CBOR.

use serde_json::Value;

use crate::route::Miss;
use crate::tick::{self, Tick};

/// Decode back-to-back msgpack values, each of which must be a map.
pub(crate) fn msgpack(bytes: &[u8]) -> Result<Vec<Tick>, Miss> {
    let mut rest = bytes;
    let mut ticks = Vec::new();
    while !rest.is_empty() {
        let value: Value =
            rmp_serde::from_read(&mut rest).map_err(|e| Miss::Syntax(e.to_string()))?;
        ticks.push(tick::from_value(value)?);
    }
    if ticks.is_empty() {
        return Err(Miss::Empty);
    }
    Ok(ticks)
}

/// Decode back-to-back CBOR values.
///
/// A stream holding a single array is flattened into its elements.
pub(crate) fn cbor(bytes: &[u8]) -> Result<Vec<Tick>, Miss> {
    let mut rest = bytes;
    let mut values = Vec::new();
    while !rest.is_empty() {
        let value: Value =
            ciborium::de::from_reader(&mut rest).map_err(|e| Miss::Syntax(e.to_string()))?;
        values.push(value);
    }
    if let [Value::Array(_)] = values.as_slice() {
        if let Some(Value::Array(items)) = values.pop() {
            values = items;
        }
    }
    if values.is_empty() {
        return Err(Miss::Empty);
    }
    tick::from_values(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn packed(values: &[Value]) -> Vec<u8> {
        values
            .iter()
            .flat_map(|v| rmp_serde::to_vec_named(v).unwrap())
            .collect()
    }

    fn cbor_bytes(value: &Value) -> Vec<u8> {
        let mut out = Vec::new();
        ciborium::ser::into_writer(value, &mut out).unwrap();
        out
    }

    #[test]
    fn msgpack_stream() {
        let bytes = packed(&[json!({"t": 1}), json!({"t": 2, "x": 0.5})]);
        let ticks = msgpack(&bytes).unwrap();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[1]["x"], 0.5);
    }

    #[test]
    fn msgpack_rejects_scalars_and_truncation() {
        assert_eq!(msgpack(&packed(&[json!(5)])), Err(Miss::Shape("number")));
        let bytes = packed(&[json!({"name": "long enough"})]);
        assert!(msgpack(&bytes[..bytes.len() - 2]).is_err());
        assert_eq!(msgpack(&[]), Err(Miss::Empty));
    }

    #[test]
    fn cbor_stream_and_array() {
        let mut bytes = cbor_bytes(&json!({"t": 1}));
        bytes.extend(cbor_bytes(&json!({"t": 2})));
        assert_eq!(cbor(&bytes).unwrap().len(), 2);

        let array = cbor_bytes(&json!([{"t": 1}, {"t": 2}, {"t": 3}]));
        assert_eq!(cbor(&array).unwrap().len(), 3);
        assert_eq!(cbor(&cbor_bytes(&json!([]))), Err(Miss::Empty));
    }

    #[test]
    fn cbor_rejects_json_text() {
        assert!(cbor(br#"{"t":1}"#).is_err());
    }
}
