//! # Scalar Codec
//!
//! Text encoding of single leaf values, and the type-inference rules used to
//! decode loosely-typed fields back.

use crate::error::{Result, TelemetryXmlError};
use crate::records::{Numeric, Value};

/// Fields whose text is kept verbatim even when it looks numeric
pub const STRING_FIELDS: [&str; 3] = ["str", "source", "BINS"];

/// Fields holding a bracketed, space-separated list of unsigned bytes
pub const BYTE_ARRAY_FIELDS: [&str; 3] = ["prev_bbr_command", "prev_burst_command", "prev_command"];

/// Whether `field` is decoded as a verbatim string
pub fn is_string_field(field: &str) -> bool {
    STRING_FIELDS.contains(&field)
}

/// Whether `field` is decoded as a byte list such as `[1 2 255]`
pub fn is_byte_array_field(field: &str) -> bool {
    BYTE_ARRAY_FIELDS.contains(&field)
}

/// Render a leaf value as element text
///
/// Returns `None` for `Value::Map`, which is not a scalar.
///
/// Floats use the shortest representation that parses back to the same value
/// and always keep a fractional part or exponent, so `3.0` never reads back as
/// the integer `3`.
pub fn encode_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Int(v) => Some(v.to_string()),
        Value::Float(v) => Some(encode_float(*v)),
        Value::Str(s) => Some(s.clone()),
        Value::Bytes(bytes) => Some(encode_byte_list(bytes)),
        Value::Map(_) => None,
    }
}

/// Render a GPS value as element text, with the same float rules as
/// `encode_scalar`
pub fn encode_numeric(value: Numeric) -> String {
    match value {
        Numeric::Int(v) => v.to_string(),
        Numeric::Float(v) => encode_float(v),
    }
}

fn encode_float(v: f64) -> String {
    format!("{:?}", v)
}

fn encode_byte_list(bytes: &[u8]) -> String {
    let body: Vec<String> = bytes.iter().map(u8::to_string).collect();
    format!("[{}]", body.join(" "))
}

/// Decode element text for the field `field`
///
/// Rules, in order:
/// 1. String fields (`str`, `source`, `BINS`) are returned unchanged.
/// 2. Byte-array fields lose one leading `[` and trailing `]`; the remaining
///    whitespace-separated tokens must each be a byte (0-255).
/// 3. Anything else is an integer if it parses as one, else a float.
///
/// # Errors
///
/// Returns `InvalidField` if a byte-array token is not a byte, or if a
/// generic field is neither an integer nor a float. There is no fallback to
/// string for fields outside the string set.
///
/// # Examples
///
/// ```
/// use telemetry_xml::records::Value;
/// use telemetry_xml::xml::scalar::decode_scalar;
///
/// assert_eq!(decode_scalar("uptime", "42")?, Value::Int(42));
/// assert_eq!(decode_scalar("str", " 42 ")?, Value::Str(" 42 ".to_string()));
/// assert_eq!(decode_scalar("prev_command", "[1 2 255]")?, Value::Bytes(vec![1, 2, 255]));
/// # Ok::<(), telemetry_xml::TelemetryXmlError>(())
/// ```
pub fn decode_scalar(field: &str, text: &str) -> Result<Value> {
    if is_string_field(field) {
        return Ok(Value::Str(text.to_string()));
    }
    if is_byte_array_field(field) {
        return decode_byte_list(field, text).map(Value::Bytes);
    }
    Ok(match decode_numeric(field, text)? {
        Numeric::Int(v) => Value::Int(v),
        Numeric::Float(v) => Value::Float(v),
    })
}

/// Integer if possible, else float, else error
pub fn decode_numeric(field: &str, text: &str) -> Result<Numeric> {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(Numeric::Int(v));
    }
    trimmed
        .parse::<f64>()
        .map(Numeric::Float)
        .map_err(|_| TelemetryXmlError::invalid_field(field, format!("'{}' is neither an integer nor a float", text)))
}

/// Strict integer decode for all-integer configuration fields
pub fn decode_integer(field: &str, text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| TelemetryXmlError::invalid_field(field, format!("'{}' is not an integer", text)))
}

fn decode_byte_list(field: &str, text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    inner
        .split_whitespace()
        .map(|token| {
            token.parse::<u8>().map_err(|_| {
                TelemetryXmlError::invalid_field(field, format!("'{}' is not an unsigned byte", token))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_integer_inference() {
        assert_eq!(decode_scalar("temp", "42").unwrap(), Value::Int(42));
        assert_eq!(decode_scalar("temp", "-7").unwrap(), Value::Int(-7));
    }

    #[test]
    fn test_decode_float_inference() {
        assert_eq!(decode_scalar("temp", "3.14").unwrap(), Value::Float(3.14));
        assert_eq!(decode_scalar("temp", "1e-3").unwrap(), Value::Float(0.001));
    }

    #[test]
    fn test_decode_non_numeric_is_error() {
        match decode_scalar("temp", "abc") {
            Err(TelemetryXmlError::InvalidField { field, .. }) => assert_eq!(field, "temp"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_decode_string_override() {
        assert_eq!(decode_scalar("str", "abc").unwrap(), Value::Str("abc".into()));
        assert_eq!(decode_scalar("source", "12").unwrap(), Value::Str("12".into()));
        assert_eq!(decode_scalar("BINS", "0110").unwrap(), Value::Str("0110".into()));
    }

    #[test]
    fn test_decode_byte_array_override() {
        assert_eq!(
            decode_scalar("prev_command", "[  1   2 255]").unwrap(),
            Value::Bytes(vec![1, 2, 255])
        );
        assert_eq!(decode_scalar("prev_bbr_command", "[]").unwrap(), Value::Bytes(vec![]));
    }

    #[test]
    fn test_decode_byte_array_bad_token() {
        assert!(decode_scalar("prev_burst_command", "[1 x 3]").is_err());
        assert!(decode_scalar("prev_burst_command", "[1 256]").is_err());
    }

    #[test]
    fn test_byte_array_round_trip() {
        let encoded = encode_scalar(&Value::Bytes(vec![1, 2, 255])).unwrap();
        assert_eq!(encoded, "[1 2 255]");
        assert_eq!(decode_scalar("prev_command", &encoded).unwrap(), Value::Bytes(vec![1, 2, 255]));
    }

    #[test]
    fn test_encode_float_keeps_marker() {
        assert_eq!(encode_scalar(&Value::Float(3.0)).unwrap(), "3.0");
        assert_eq!(decode_scalar("x", "3.0").unwrap(), Value::Float(3.0));
    }

    #[test]
    fn test_encode_float_is_round_trip_stable() {
        for v in [0.1, 1.0 / 3.0, -123456.789, 6.02214076e23, 1e-300] {
            let text = encode_scalar(&Value::Float(v)).unwrap();
            assert_eq!(decode_scalar("x", &text).unwrap(), Value::Float(v), "text: {}", text);
        }
    }

    #[test]
    fn test_encode_map_is_not_scalar() {
        assert_eq!(encode_scalar(&Value::Map(Default::default())), None);
    }

    #[test]
    fn test_decode_integer_strict() {
        assert_eq!(decode_integer("BURST_PULSES", " 8 ").unwrap(), 8);
        assert!(decode_integer("BURST_PULSES", "8.5").is_err());
    }

    #[test]
    fn test_encode_numeric() {
        assert_eq!(encode_numeric(Numeric::Int(12)), "12");
        assert_eq!(encode_numeric(Numeric::Float(-0.5)), "-0.5");
    }
}
