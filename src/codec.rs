//! # Codec Facade
//!
//! `TelemetryXml` bundles an observer and read options and exposes, per
//! record kind, string-level `encode_*`/`decode_*` and file-level
//! `write_*`/`read_*` operations.
//!
//! File access is whole-buffer: a document is rendered in memory and written
//! in one call, or read in one call and then parsed. A failure part-way
//! through a write can leave an incomplete file; callers that need atomic
//! replacement should write to a temporary path and rename.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::Result;
use crate::observer::{CodecEvent, CodecObserver, NoopObserver};
use crate::records::{BurstRecord, RecordKind, StatusMessage, SurveyRecord};
use crate::xml::{burst, status, survey};

/// Telemetry XML reader/writer
#[derive(Debug, Clone, Default)]
pub struct TelemetryXml<O = NoopObserver> {
    observer: O,
    expected_survey_bins: Option<usize>,
}

impl TelemetryXml<NoopObserver> {
    /// Codec with no observer and no survey length check
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: CodecObserver> TelemetryXml<O> {
    pub fn with_observer(observer: O) -> Self {
        Self {
            observer,
            expected_survey_bins: None,
        }
    }

    /// Codec configured from the `[survey]` section of a `Config`
    pub fn from_config(config: &Config, observer: O) -> Self {
        Self::with_observer(observer).expected_survey_bins(config.survey.expected_bins())
    }

    /// Report survey columns whose length differs from `bins` (`None` disables)
    pub fn expected_survey_bins(mut self, bins: Option<usize>) -> Self {
        self.expected_survey_bins = bins;
        self
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    // ---- status ----

    pub fn encode_status(&self, messages: &[StatusMessage]) -> Result<String> {
        self.encode_status_at(messages, Utc::now())
    }

    pub fn encode_status_at(&self, messages: &[StatusMessage], created: DateTime<Utc>) -> Result<String> {
        status::encode_status_document(messages, created, &self.observer)
    }

    pub fn decode_status(&self, xml: &str) -> Result<Vec<StatusMessage>> {
        status::decode_status_document(xml, &self.observer)
    }

    /// Write status messages to `path`, sorted by header timestamp
    pub fn write_status<P: AsRef<Path>>(&self, messages: &[StatusMessage], path: P) -> Result<()> {
        let xml = self.encode_status(messages)?;
        self.write_document(RecordKind::Status, path.as_ref(), &xml)
    }

    pub fn read_status<P: AsRef<Path>>(&self, path: P) -> Result<Vec<StatusMessage>> {
        let xml = self.read_document(RecordKind::Status, path.as_ref())?;
        self.decode_status(&xml)
    }

    // ---- survey ----

    pub fn encode_survey(&self, records: &[SurveyRecord]) -> Result<String> {
        self.encode_survey_at(records, Utc::now())
    }

    pub fn encode_survey_at(&self, records: &[SurveyRecord], created: DateTime<Utc>) -> Result<String> {
        survey::encode_survey_document(records, created, &self.observer)
    }

    pub fn decode_survey(&self, xml: &str) -> Result<Vec<SurveyRecord>> {
        survey::decode_survey_document(xml, self.expected_survey_bins, &self.observer)
    }

    /// Write survey records to `path`, sorted by header timestamp
    pub fn write_survey<P: AsRef<Path>>(&self, records: &[SurveyRecord], path: P) -> Result<()> {
        let xml = self.encode_survey(records)?;
        self.write_document(RecordKind::Survey, path.as_ref(), &xml)
    }

    pub fn read_survey<P: AsRef<Path>>(&self, path: P) -> Result<Vec<SurveyRecord>> {
        let xml = self.read_document(RecordKind::Survey, path.as_ref())?;
        self.decode_survey(&xml)
    }

    // ---- burst ----

    pub fn encode_burst(&self, records: &[BurstRecord]) -> Result<String> {
        self.encode_burst_at(records, Utc::now())
    }

    pub fn encode_burst_at(&self, records: &[BurstRecord], created: DateTime<Utc>) -> Result<String> {
        burst::encode_burst_document(records, created, &self.observer)
    }

    pub fn decode_burst(&self, xml: &str) -> Result<Vec<BurstRecord>> {
        burst::decode_burst_document(xml, &self.observer)
    }

    /// Write burst records to `path`, sorted by header timestamp
    pub fn write_burst<P: AsRef<Path>>(&self, records: &[BurstRecord], path: P) -> Result<()> {
        let xml = self.encode_burst(records)?;
        self.write_document(RecordKind::Burst, path.as_ref(), &xml)
    }

    pub fn read_burst<P: AsRef<Path>>(&self, path: P) -> Result<Vec<BurstRecord>> {
        let xml = self.read_document(RecordKind::Burst, path.as_ref())?;
        self.decode_burst(&xml)
    }

    fn write_document(&self, kind: RecordKind, path: &Path, xml: &str) -> Result<()> {
        fs::write(path, xml)?;
        self.observer.on_event(&CodecEvent::FileWritten {
            kind,
            path: path.to_path_buf(),
            bytes: xml.len(),
        });
        Ok(())
    }

    fn read_document(&self, kind: RecordKind, path: &Path) -> Result<String> {
        let xml = fs::read_to_string(path)?;
        self.observer.on_event(&CodecEvent::FileRead {
            kind,
            path: path.to_path_buf(),
            bytes: xml.len(),
        });
        Ok(xml)
    }
}
