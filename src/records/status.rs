//! Status messages: free-form field maps keyed by the receiver's status block names.

use serde::{Deserialize, Serialize};

use super::value::{FieldMap, Value};
use super::Timestamped;

/// One decoded status message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Packet receipt time, seconds since the Unix epoch (UTC)
    pub header_timestamp: f64,

    /// Status fields in producer order; values may nest
    pub fields: FieldMap,
}

impl StatusMessage {
    pub fn new(header_timestamp: f64) -> Self {
        Self {
            header_timestamp,
            fields: FieldMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl Timestamped for StatusMessage {
    fn header_timestamp(&self) -> f64 {
        self.header_timestamp
    }
}
