//! Decoding engine replies
//!
//! The engine answers Lua calls with the JSON encoding of the returned value.
//! A missing setting comes back as `null`.

use camsync_core::{BridgeError, ReadResult};
use serde_json::Value;

/// Decode the reply to a `settings.getValue` call
pub fn decode_value(reply: &str) -> ReadResult {
    let value: Value = serde_json::from_str(reply)
        .map_err(|e| BridgeError::Decode(format!("{}: {}", e, reply)))?;

    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| BridgeError::Decode(format!("number out of range: {}", n))),
        // Settings edited through text fields are sometimes stored as strings
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| BridgeError::Decode(format!("not a number: {:?}", s))),
        other => Err(BridgeError::Decode(format!("unexpected value: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_number() {
        assert_eq!(decode_value("7.5"), Ok(Some(7.5)));
        assert_eq!(decode_value("0"), Ok(Some(0.0)));
        assert_eq!(decode_value("-3"), Ok(Some(-3.0)));
    }

    #[test]
    fn test_decode_null_is_missing() {
        assert_eq!(decode_value("null"), Ok(None));
    }

    #[test]
    fn test_decode_numeric_string() {
        assert_eq!(decode_value("\" 1.25\""), Ok(Some(1.25)));
    }

    #[test]
    fn test_decode_rejects_non_numbers() {
        assert!(matches!(decode_value("true"), Err(BridgeError::Decode(_))));
        assert!(matches!(decode_value("\"abc\""), Err(BridgeError::Decode(_))));
        assert!(matches!(decode_value("{\"x\":1}"), Err(BridgeError::Decode(_))));
        assert!(matches!(decode_value("not json"), Err(BridgeError::Decode(_))));
    }
}
