//! # Codec Observer
//!
//! The codec never logs on its own. Callers that want progress or diagnostics
//! hand it a `CodecObserver`; `NoopObserver` is the default and
//! `TracingObserver` forwards everything to `tracing`.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::records::{RecordKind, SampleDomain};

/// Something the codec did or noticed
#[derive(Debug, Clone, PartialEq)]
pub enum CodecEvent {
    /// A document was rendered to text
    DocumentEncoded { kind: RecordKind, records: usize },

    /// A document was parsed and all of its records decoded
    DocumentDecoded { kind: RecordKind, records: usize },

    /// A document was written to disk
    FileWritten { kind: RecordKind, path: PathBuf, bytes: usize },

    /// A document was read from disk
    FileRead { kind: RecordKind, path: PathBuf, bytes: usize },

    /// A burst record was decoded
    BurstDecoded {
        index: usize,
        domain: SampleDomain,
        e_len: usize,
        b_len: usize,
        gps_fixes: usize,
    },

    /// A burst's `TD_FD_SELECT` is missing or disagrees with the shape of its
    /// samples. The record is not written.
    DomainMismatch {
        header_timestamp: f64,
        declared: Option<i64>,
        samples: SampleDomain,
    },

    /// A survey column does not have the expected number of bins
    SurveyLengthMismatch {
        index: usize,
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Receiver of codec events
#[cfg_attr(test, mockall::automock)]
pub trait CodecObserver {
    fn on_event(&self, event: &CodecEvent);
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CodecObserver for NoopObserver {
    fn on_event(&self, _event: &CodecEvent) {}
}

/// Observer that logs events through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CodecObserver for TracingObserver {
    fn on_event(&self, event: &CodecEvent) {
        match event {
            CodecEvent::DocumentEncoded { kind, records } => {
                debug!("Encoded {} {} records", records, kind);
            }
            CodecEvent::DocumentDecoded { kind, records } => {
                info!("Loaded {} {} records", records, kind);
            }
            CodecEvent::FileWritten { kind, path, bytes } => {
                info!("Wrote {} data to {} ({} bytes)", kind, path.display(), bytes);
            }
            CodecEvent::FileRead { kind, path, bytes } => {
                debug!("Read {} bytes of {} data from {}", bytes, kind, path.display());
            }
            CodecEvent::BurstDecoded { index, domain, e_len, b_len, gps_fixes } => {
                debug!(
                    "Burst #{}: {}, E data of size {}, B data of size {}, {} GPS elements",
                    index, domain, e_len, b_len, gps_fixes
                );
            }
            CodecEvent::DomainMismatch { header_timestamp, declared, samples } => {
                warn!(
                    "Burst at {} rejected: TD_FD_SELECT = {:?} but samples are {}",
                    header_timestamp, declared, samples
                );
            }
            CodecEvent::SurveyLengthMismatch { index, field, expected, actual } => {
                warn!(
                    "Survey #{}: {} has {} bins, expected {}",
                    index, field, actual, expected
                );
            }
        }
    }
}

impl<T: CodecObserver + ?Sized> CodecObserver for &T {
    fn on_event(&self, event: &CodecEvent) {
        (**self).on_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder(RefCell<Vec<CodecEvent>>);

    impl CodecObserver for Recorder {
        fn on_event(&self, event: &CodecEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn test_observer_by_reference() {
        let recorder = Recorder(RefCell::new(Vec::new()));
        let event = CodecEvent::DocumentEncoded { kind: RecordKind::Survey, records: 2 };

        let by_ref: &dyn CodecObserver = &recorder;
        (&by_ref).on_event(&event);

        assert_eq!(recorder.0.borrow().as_slice(), &[event]);
    }

    #[test]
    fn test_builtin_observers_accept_all_events() {
        let events = [
            CodecEvent::DocumentDecoded { kind: RecordKind::Burst, records: 1 },
            CodecEvent::DomainMismatch {
                header_timestamp: 1.0,
                declared: Some(1),
                samples: SampleDomain::FrequencyDomain,
            },
            CodecEvent::SurveyLengthMismatch { index: 0, field: "E_data", expected: 512, actual: 3 },
        ];
        for event in &events {
            NoopObserver.on_event(event);
            TracingObserver.on_event(event);
        }
    }
}
