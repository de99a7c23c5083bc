//! # XML Codec
//!
//! Encoding and decoding of telemetry records as XML documents.
//!
//! This module handles:
//! - Scalar values with type inference and per-field overrides
//! - Comma-separated sample arrays (real and complex)
//! - Status, survey and burst record layouts
//! - Document assembly (sorting, creation stamp, generic decode kernel)

pub mod array;
pub mod burst;
pub mod document;
pub mod element;
pub mod scalar;
pub mod status;
pub mod survey;
pub mod timestamp;

/// Root attribute holding the document's creation instant
pub const FILE_CREATION_DATE: &str = "file_creation_date";

/// Record attribute holding the record's header timestamp
pub const HEADER_TIMESTAMP: &str = "header_timestamp";

/// Electric field sample element
pub const E_DATA: &str = "E_data";

/// Magnetic field sample element
pub const B_DATA: &str = "B_data";

/// GPS container element
pub const GPS: &str = "GPS";
