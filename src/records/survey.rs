//! Survey records: one spectral column of E and B field magnitudes.

use serde::{Deserialize, Serialize};

use super::gps::GpsFix;
use super::Timestamped;

/// Number of frequency bins in a survey column
pub const SURVEY_BINS: usize = 512;

/// One survey product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    /// Packet receipt time, seconds since the Unix epoch (UTC)
    pub header_timestamp: f64,

    /// Electric field spectrum (nominally `SURVEY_BINS` bins)
    #[serde(rename = "E_data")]
    pub e_data: Vec<u8>,

    /// Magnetic field spectrum (nominally `SURVEY_BINS` bins)
    #[serde(rename = "B_data")]
    pub b_data: Vec<u8>,

    /// GPS fix recorded alongside the column, if any
    #[serde(rename = "GPS", default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsFix>,
}

impl SurveyRecord {
    pub fn new(header_timestamp: f64, e_data: Vec<u8>, b_data: Vec<u8>) -> Self {
        Self {
            header_timestamp,
            e_data,
            b_data,
            gps: None,
        }
    }

    pub fn with_gps(mut self, gps: GpsFix) -> Self {
        self.gps = Some(gps);
        self
    }
}

impl Timestamped for SurveyRecord {
    fn header_timestamp(&self) -> f64 {
        self.header_timestamp
    }
}
