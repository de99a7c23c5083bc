//! # GPS Fix
//!
//! Navigation solution snapshot attached to survey and burst records.
//! Every field is numeric: integer where the receiver reports counters or
//! lock-status codes, floating point for positions and velocities.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Integer-or-float GPS field value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Numeric::Int(v) => v as f64,
            Numeric::Float(v) => v,
        }
    }
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Numeric::Int(v)
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Numeric::Float(v)
    }
}

/// One GPS fix: ordered field name -> numeric value
///
/// Field names come from the receiver (`lat`, `lon`, `alt`, `vel_e`, `solution_status`,
/// `weeknum`, ...) and are not fixed by the codec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GpsFix {
    fields: IndexMap<String, Numeric>,
}

impl GpsFix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Numeric>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Numeric>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<Numeric> {
        self.fields.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Numeric)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_insertion_order() {
        let fix = GpsFix::new()
            .with("lat", 37.7749)
            .with("lon", -122.4194)
            .with("weeknum", 2100i64);

        let names: Vec<&str> = fix.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["lat", "lon", "weeknum"]);
        assert_eq!(fix.get("weeknum"), Some(Numeric::Int(2100)));
        assert_eq!(fix.len(), 3);
    }

    #[test]
    fn test_numeric_as_f64() {
        assert_eq!(Numeric::Int(3).as_f64(), 3.0);
        assert_eq!(Numeric::Float(-1.25).as_f64(), -1.25);
    }
}
