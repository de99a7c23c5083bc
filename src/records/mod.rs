//! # Telemetry Records
//!
//! In-memory shapes of the decoded telemetry products handed to the codec by
//! the packet-reassembly stage:
//! - Status messages (free-form, possibly nested field maps)
//! - Survey records (one spectral column of E/B field data + optional GPS fix)
//! - Burst records (configuration, GPS fixes and time- or frequency-domain samples)

pub mod burst;
pub mod gps;
pub mod status;
pub mod survey;
pub mod value;

pub use burst::{BbrConfig, BurstConfig, BurstRecord, BurstSamples, Complex16, SampleDomain};
pub use gps::{GpsFix, Numeric};
pub use status::StatusMessage;
pub use survey::{SurveyRecord, SURVEY_BINS};
pub use value::{FieldMap, Value};

use serde::{Deserialize, Serialize};

/// Record kinds persisted by the codec, one document type each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Status,
    Survey,
    Burst,
}

impl RecordKind {
    /// Root element tag of a document holding this kind
    pub fn root_tag(&self) -> &'static str {
        match self {
            RecordKind::Status => "status_messages",
            RecordKind::Survey => "survey_data",
            RecordKind::Burst => "burst_data",
        }
    }

    /// Tag of each record element under the root
    pub fn record_tag(&self) -> &'static str {
        match self {
            RecordKind::Status => "status",
            RecordKind::Survey => "survey",
            RecordKind::Burst => "burst",
        }
    }

    /// File name used when the caller does not choose one
    pub fn default_file_name(&self) -> &'static str {
        match self {
            RecordKind::Status => "status_messages.xml",
            RecordKind::Survey => "survey_data.xml",
            RecordKind::Burst => "burst_data.xml",
        }
    }

    /// Identify a document kind from its root tag
    pub fn from_root_tag(tag: &str) -> Option<Self> {
        [RecordKind::Status, RecordKind::Survey, RecordKind::Burst]
            .into_iter()
            .find(|kind| kind.root_tag() == tag)
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.record_tag())
    }
}

/// Anything carrying a header timestamp (seconds since the Unix epoch, UTC)
pub trait Timestamped {
    fn header_timestamp(&self) -> f64;
}
