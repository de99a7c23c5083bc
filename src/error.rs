//! # Error Types
//!
//! Custom error types for the telemetry XML codec using `thiserror`.

use thiserror::Error;

/// Main error type for the telemetry XML codec
#[derive(Debug, Error)]
pub enum TelemetryXmlError {
    /// I/O errors (file not found, permission denied, ...)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Low-level XML syntax errors reported by the parser or writer
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Well-formed XML that does not have the expected document shape
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A required child element is absent
    #[error("Missing element <{element}> in <{parent}>")]
    MissingElement { element: String, parent: String },

    /// A required attribute is absent
    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute { attribute: String, element: String },

    /// A field's text could not be decoded as the type the field requires
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// A timestamp that is not valid ISO-8601 or is out of range
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A failure inside one record, tagged with the record's position
    #[error("{kind} record #{index}: {source}")]
    Record {
        kind: &'static str,
        index: usize,
        #[source]
        source: Box<TelemetryXmlError>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl TelemetryXmlError {
    pub(crate) fn missing_element(element: &str, parent: &str) -> Self {
        Self::MissingElement {
            element: element.to_string(),
            parent: parent.to_string(),
        }
    }

    pub(crate) fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Strip any `Record` wrapping and return the underlying error
    pub fn root_cause(&self) -> &TelemetryXmlError {
        match self {
            Self::Record { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for the telemetry XML codec
pub type Result<T> = std::result::Result<T, TelemetryXmlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_message() {
        let err = TelemetryXmlError::missing_element("burst_config", "burst");
        assert_eq!(err.to_string(), "Missing element <burst_config> in <burst>");
    }

    #[test]
    fn test_record_error_names_position_and_cause() {
        let err = TelemetryXmlError::Record {
            kind: "survey",
            index: 3,
            source: Box::new(TelemetryXmlError::invalid_field("E_data", "bad token 'x'")),
        };
        assert_eq!(
            err.to_string(),
            "survey record #3: Invalid value for field 'E_data': bad token 'x'"
        );
        assert!(matches!(
            err.root_cause(),
            TelemetryXmlError::InvalidField { field, .. } if field == "E_data"
        ));
    }
}
