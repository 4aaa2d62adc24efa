use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BookingError;

/// Decodes a success body that is either the payload itself or an object
/// wrapping it under `key` (`{"appointment": {...}}`).
pub fn decode_envelope<T: DeserializeOwned>(body: &str, key: &str) -> Result<T, BookingError> {
    let value: Value = serde_json::from_str(body)?;
    let payload = match value {
        Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    };
    Ok(serde_json::from_value(payload)?)
}
