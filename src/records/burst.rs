//! # Burst Records
//!
//! A burst is a capture of raw E/B channel data taken under a given burst
//! configuration. The `TD_FD_SELECT` configuration field selects whether the
//! samples are real time-domain values or complex frequency-domain bins.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::gps::GpsFix;
use super::value::{FieldMap, Value};
use super::Timestamped;

/// Name of the time/frequency domain discriminant in the burst configuration
pub const TD_FD_SELECT: &str = "TD_FD_SELECT";

/// `TD_FD_SELECT` value for time-domain bursts
pub const TD_FD_SELECT_TIME: i64 = 1;

/// `TD_FD_SELECT` value for frequency-domain bursts
pub const TD_FD_SELECT_FREQUENCY: i64 = 0;

/// Sample domain of a burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleDomain {
    TimeDomain,
    FrequencyDomain,
}

impl SampleDomain {
    /// Map a `TD_FD_SELECT` value to a domain
    pub fn from_td_fd_select(value: i64) -> Option<Self> {
        match value {
            TD_FD_SELECT_TIME => Some(SampleDomain::TimeDomain),
            TD_FD_SELECT_FREQUENCY => Some(SampleDomain::FrequencyDomain),
            _ => None,
        }
    }

    pub fn td_fd_select(&self) -> i64 {
        match self {
            SampleDomain::TimeDomain => TD_FD_SELECT_TIME,
            SampleDomain::FrequencyDomain => TD_FD_SELECT_FREQUENCY,
        }
    }

    /// Human-readable label written as the `mode` attribute of sample elements
    pub fn label(&self) -> &'static str {
        match self {
            SampleDomain::TimeDomain => "time domain",
            SampleDomain::FrequencyDomain => "frequency domain",
        }
    }
}

impl std::fmt::Display for SampleDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Complex sample with 16-bit signed components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Complex16 {
    pub re: i16,
    pub im: i16,
}

impl Complex16 {
    pub const fn new(re: i16, im: i16) -> Self {
        Self { re, im }
    }
}

/// Burst sample data, shaped by the sample domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum BurstSamples {
    /// Real 16-bit samples (`TD_FD_SELECT == 1`)
    TimeDomain {
        #[serde(rename = "E")]
        e: Vec<i16>,
        #[serde(rename = "B")]
        b: Vec<i16>,
    },
    /// Complex 16-bit bins (`TD_FD_SELECT == 0`)
    FrequencyDomain {
        #[serde(rename = "E")]
        e: Vec<Complex16>,
        #[serde(rename = "B")]
        b: Vec<Complex16>,
    },
}

impl BurstSamples {
    pub fn domain(&self) -> SampleDomain {
        match self {
            BurstSamples::TimeDomain { .. } => SampleDomain::TimeDomain,
            BurstSamples::FrequencyDomain { .. } => SampleDomain::FrequencyDomain,
        }
    }

    /// Sample counts of the E and B channels
    pub fn lens(&self) -> (usize, usize) {
        match self {
            BurstSamples::TimeDomain { e, b } => (e.len(), b.len()),
            BurstSamples::FrequencyDomain { e, b } => (e.len(), b.len()),
        }
    }
}

/// Burst configuration: integer fields, except `str` and `BINS` which are strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BurstConfig {
    fields: FieldMap,
}

impl BurstConfig {
    /// Configuration fields stored as text
    pub const STRING_FIELDS: [&'static str; 2] = ["str", "BINS"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_string_field(name: &str) -> bool {
        Self::STRING_FIELDS.contains(&name)
    }

    /// Builder-style integer field
    pub fn with_int(mut self, name: impl Into<String>, value: i64) -> Self {
        self.fields.insert(name.into(), Value::Int(value));
        self
    }

    /// Builder-style string field
    pub fn with_str(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), Value::Str(value.into()));
        self
    }

    pub fn insert_int(&mut self, name: impl Into<String>, value: i64) {
        self.fields.insert(name.into(), Value::Int(value));
    }

    pub fn insert_str(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), Value::Str(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The `TD_FD_SELECT` discriminant, if present and integer
    pub fn td_fd_select(&self) -> Option<i64> {
        self.fields.get(TD_FD_SELECT).and_then(Value::as_int)
    }
}

/// uBBR (broadband receiver) configuration: all-integer fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BbrConfig {
    fields: IndexMap<String, i64>,
}

impl BbrConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: i64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: i64) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.fields.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One burst product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstRecord {
    /// Packet receipt time, seconds since the Unix epoch (UTC)
    pub header_timestamp: f64,

    pub config: BurstConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbr_config: Option<BbrConfig>,

    /// GPS fixes captured during the burst (zero or more)
    #[serde(rename = "G", default)]
    pub gps: Vec<GpsFix>,

    pub samples: BurstSamples,
}

impl BurstRecord {
    pub fn new(header_timestamp: f64, config: BurstConfig, samples: BurstSamples) -> Self {
        Self {
            header_timestamp,
            config,
            bbr_config: None,
            gps: Vec::new(),
            samples,
        }
    }

    pub fn with_bbr_config(mut self, bbr: BbrConfig) -> Self {
        self.bbr_config = Some(bbr);
        self
    }

    pub fn with_gps(mut self, fix: GpsFix) -> Self {
        self.gps.push(fix);
        self
    }

    /// Whether the configuration's `TD_FD_SELECT` agrees with the sample shape
    pub fn domain_consistent(&self) -> bool {
        self.config.td_fd_select() == Some(self.samples.domain().td_fd_select())
    }
}

impl Timestamped for BurstRecord {
    fn header_timestamp(&self) -> f64 {
        self.header_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_from_td_fd_select() {
        assert_eq!(SampleDomain::from_td_fd_select(1), Some(SampleDomain::TimeDomain));
        assert_eq!(SampleDomain::from_td_fd_select(0), Some(SampleDomain::FrequencyDomain));
        assert_eq!(SampleDomain::from_td_fd_select(2), None);
    }

    #[test]
    fn test_domain_labels() {
        assert_eq!(SampleDomain::TimeDomain.label(), "time domain");
        assert_eq!(SampleDomain::FrequencyDomain.to_string(), "frequency domain");
    }

    #[test]
    fn test_domain_consistent() {
        let td = BurstSamples::TimeDomain { e: vec![1], b: vec![2] };
        let record = BurstRecord::new(0.0, BurstConfig::new().with_int(TD_FD_SELECT, 1), td.clone());
        assert!(record.domain_consistent());

        let record = BurstRecord::new(0.0, BurstConfig::new().with_int(TD_FD_SELECT, 0), td.clone());
        assert!(!record.domain_consistent());

        let record = BurstRecord::new(0.0, BurstConfig::new(), td);
        assert!(!record.domain_consistent());
    }

    #[test]
    fn test_sample_lens() {
        let fd = BurstSamples::FrequencyDomain {
            e: vec![Complex16::new(3, 4); 5],
            b: vec![Complex16::default(); 2],
        };
        assert_eq!(fd.lens(), (5, 2));
        assert_eq!(fd.domain(), SampleDomain::FrequencyDomain);
    }

    #[test]
    fn test_config_string_fields() {
        assert!(BurstConfig::is_string_field("str"));
        assert!(BurstConfig::is_string_field("BINS"));
        assert!(!BurstConfig::is_string_field(TD_FD_SELECT));
    }

    #[test]
    fn test_samples_json_tagged_by_domain() {
        let td = BurstSamples::TimeDomain { e: vec![-1, 2], b: vec![] };
        let json = serde_json::to_string(&td).unwrap();
        assert_eq!(json, r#"{"domain":"time_domain","E":[-1,2],"B":[]}"#);
    }
}
