//! # Telemetry XML
//!
//! Persist decoded VLF receiver telemetry as self-describing XML documents.
//!
//! This library converts status messages, survey spectra and burst captures
//! produced by the packet-reassembly stage to and from XML, including
//! comma-separated sample arrays, time/frequency-domain burst samples and a
//! schema-free decoder for free-form status fields.
//!
//! ```no_run
//! use telemetry_xml::{SurveyRecord, TelemetryXml};
//!
//! let codec = TelemetryXml::new();
//! let records = vec![SurveyRecord::new(1_700_000_000.0, vec![0; 512], vec![0; 512])];
//! codec.write_survey(&records, "survey_data.xml")?;
//! let back = codec.read_survey("survey_data.xml")?;
//! # Ok::<(), telemetry_xml::error::TelemetryXmlError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod observer;
pub mod records;
pub mod xml;

pub use codec::TelemetryXml;
pub use error::{Result, TelemetryXmlError};
pub use observer::{CodecEvent, CodecObserver, NoopObserver, TracingObserver};
pub use records::{
    BbrConfig, BurstConfig, BurstRecord, BurstSamples, Complex16, FieldMap, GpsFix, Numeric,
    RecordKind, SampleDomain, StatusMessage, SurveyRecord, Value,
};
