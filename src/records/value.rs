//! Loosely-typed leaf values carried by status messages and configuration maps.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered field name -> value mapping
pub type FieldMap = IndexMap<String, Value>;

/// A status/config field value
///
/// Leaves are integers, floats, strings or unsigned byte arrays. `Map` holds a
/// nested sub-structure (e.g. `prev_bbr_command` blocks) and may nest to any depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Map(FieldMap),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&FieldMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Number of map levels below this value (0 for a leaf)
    pub fn depth(&self) -> usize {
        match self {
            Value::Map(m) => 1 + m.values().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<FieldMap> for Value {
    fn from(v: FieldMap) -> Self {
        Value::Map(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Int(7).as_float(), Some(7.0));
        assert_eq!(Value::Float(1.5).as_int(), None);
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
    }

    #[test]
    fn test_depth() {
        let mut inner = FieldMap::new();
        inner.insert("a".into(), Value::Int(1));
        let mut outer = FieldMap::new();
        outer.insert("inner".into(), Value::Map(inner));
        outer.insert("leaf".into(), Value::Float(2.0));

        assert_eq!(Value::Int(1).depth(), 0);
        assert_eq!(Value::Map(outer).depth(), 2);
    }

    #[test]
    fn test_json_untagged_shapes() {
        let v: Value = serde_json::from_str("42").unwrap();
        assert_eq!(v, Value::Int(42));
        let v: Value = serde_json::from_str("4.5").unwrap();
        assert_eq!(v, Value::Float(4.5));
        let v: Value = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(v, Value::Str("x".into()));
        let v: Value = serde_json::from_str("[1,2,255]").unwrap();
        assert_eq!(v, Value::Bytes(vec![1, 2, 255]));
        let v: Value = serde_json::from_str("{\"k\": 1}").unwrap();
        assert_eq!(v.as_map().unwrap()["k"], Value::Int(1));
    }
}
