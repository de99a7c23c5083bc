//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TelemetryXmlError};
use crate::records::{RecordKind, SURVEY_BINS};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub survey: SurveyConfig,
}

/// Output file locations
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_status_file")]
    pub status: String,

    #[serde(default = "default_survey_file")]
    pub survey: String,

    #[serde(default = "default_burst_file")]
    pub burst: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Survey decoding options
#[derive(Debug, Deserialize, Clone)]
pub struct SurveyConfig {
    /// Expected bins per survey column; 0 disables the length check
    #[serde(default = "default_expected_bins")]
    pub expected_bins: usize,
}

// Default value functions
fn default_output_dir() -> String { ".".to_string() }
fn default_status_file() -> String { RecordKind::Status.default_file_name().to_string() }
fn default_survey_file() -> String { RecordKind::Survey.default_file_name().to_string() }
fn default_burst_file() -> String { RecordKind::Burst.default_file_name().to_string() }

fn default_log_level() -> String { "info".to_string() }

fn default_expected_bins() -> usize { SURVEY_BINS }

/// Log levels accepted by `[logging] level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            status: default_status_file(),
            survey: default_survey_file(),
            burst: default_burst_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self { expected_bins: default_expected_bins() }
    }
}

impl SurveyConfig {
    /// Expected column length, or `None` when the check is disabled
    pub fn expected_bins(&self) -> Option<usize> {
        (self.expected_bins > 0).then_some(self.expected_bins)
    }
}

impl FilesConfig {
    /// Default output path for documents of `kind`
    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        let name = match kind {
            RecordKind::Status => &self.status,
            RecordKind::Survey => &self.survey,
            RecordKind::Burst => &self.burst,
        };
        Path::new(&self.output_dir).join(name)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use telemetry_xml::config::Config;
    ///
    /// let config = Config::load("telemetry-xml.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("status", &self.files.status),
            ("survey", &self.files.survey),
            ("burst", &self.files.burst),
        ] {
            if value.is_empty() {
                return Err(TelemetryXmlError::Config(
                    toml::de::Error::custom(format!("files.{} cannot be empty", name))
                ));
            }
            if !value.ends_with(".xml") {
                return Err(TelemetryXmlError::Config(
                    toml::de::Error::custom(format!("files.{} must end in .xml", name))
                ));
            }
        }

        if self.files.output_dir.is_empty() {
            return Err(TelemetryXmlError::Config(
                toml::de::Error::custom("files.output_dir cannot be empty")
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(TelemetryXmlError::Config(
                toml::de::Error::custom("logging.level must be one of: trace, debug, info, warn, error")
            ));
        }

        Ok(())
    }
}
