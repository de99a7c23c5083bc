//! # Burst Record Codec
//!
//! Layout of one burst record:
//!
//! ```text
//! <burst header_timestamp="...">
//!     <burst_config>...</burst_config>
//!     <bbr_config>...</bbr_config>          (optional)
//!     <GPS>
//!         <gps_entry>...</gps_entry>        (zero or more)
//!     </GPS>
//!     <E_data mode="time domain">1,-2,3</E_data>
//!     <B_data mode="frequency domain">
//!         <real>3,0</real>
//!         <imag>4,-1</imag>
//!     </B_data>
//! </burst>
//! ```
//!
//! `TD_FD_SELECT` selects the sample layout on both sides: the writer refuses
//! samples whose variant disagrees with it, and the reader refuses sample
//! elements laid out for the other domain. The `mode` attribute is
//! informational.

use chrono::{DateTime, Utc};

use super::array::{decode_array, decode_complex_array, encode_array, encode_complex_array};
use super::document::{decode_document, encode_document, record_element, record_timestamp};
use super::element::Element;
use super::scalar::decode_integer;
use super::survey::{decode_gps_fix, encode_gps_fix};
use super::{B_DATA, E_DATA, GPS};
use crate::error::{Result, TelemetryXmlError};
use crate::observer::{CodecEvent, CodecObserver};
use crate::records::burst::TD_FD_SELECT;
use crate::records::{
    BbrConfig, BurstConfig, BurstRecord, BurstSamples, Complex16, RecordKind, SampleDomain, Value,
};

/// Burst configuration block (integer fields plus `str`/`BINS`)
pub const BURST_CONFIG: &str = "burst_config";
/// Optional broadband receiver configuration block
pub const BBR_CONFIG: &str = "bbr_config";
/// One GPS fix inside the burst's `GPS` element
pub const GPS_ENTRY: &str = "gps_entry";
/// Sample domain label on `E_data`/`B_data`
pub const MODE: &str = "mode";
/// Real parts of a frequency-domain sample array
pub const REAL: &str = "real";
/// Imaginary parts of a frequency-domain sample array
pub const IMAG: &str = "imag";

/// Encode one burst record as a `<burst>` element
///
/// Samples are laid out according to their variant.
///
/// # Errors
///
/// - `InvalidField` naming `TD_FD_SELECT` if it is absent or disagrees with
///   the sample variant; the mismatch is also reported to the observer
/// - `InvalidField` for a configuration value the reader could not restore:
///   anything but text in `str`/`BINS`, or anything but an integer elsewhere
pub fn encode_burst_record(record: &BurstRecord, observer: &dyn CodecObserver) -> Result<Element> {
    if !record.domain_consistent() {
        let declared = record.config.td_fd_select();
        let samples = record.samples.domain();
        observer.on_event(&CodecEvent::DomainMismatch {
            header_timestamp: record.header_timestamp,
            declared,
            samples,
        });
        let reason = match declared {
            Some(value) => format!("{} declared but samples are {}", value, samples),
            None => format!("missing, samples are {}", samples),
        };
        return Err(TelemetryXmlError::invalid_field(TD_FD_SELECT, reason));
    }

    let mut element = record_element(RecordKind::Burst, record.header_timestamp)?;
    element.push(encode_burst_config(&record.config)?);
    if let Some(bbr) = &record.bbr_config {
        element.push(encode_bbr_config(bbr));
    }

    let mut gps = Element::new(GPS);
    for fix in &record.gps {
        gps.push(encode_gps_fix(GPS_ENTRY, fix));
    }
    element.push(gps);

    let mode = record.samples.domain().label();
    match &record.samples {
        BurstSamples::TimeDomain { e, b } => {
            element.push(Element::new(E_DATA).with_attribute(MODE, mode).with_text(encode_array(e)));
            element.push(Element::new(B_DATA).with_attribute(MODE, mode).with_text(encode_array(b)));
        }
        BurstSamples::FrequencyDomain { e, b } => {
            element.push(encode_complex_element(E_DATA, mode, e));
            element.push(encode_complex_element(B_DATA, mode, b));
        }
    }

    Ok(element)
}

fn encode_burst_config(config: &BurstConfig) -> Result<Element> {
    let mut element = Element::new(BURST_CONFIG);
    for (name, value) in config.iter() {
        let text = match value {
            Value::Str(text) if BurstConfig::is_string_field(name) => text.clone(),
            Value::Int(v) if !BurstConfig::is_string_field(name) => v.to_string(),
            other => {
                let expected = if BurstConfig::is_string_field(name) { "text" } else { "an integer" };
                return Err(TelemetryXmlError::invalid_field(
                    name,
                    format!("expected {}, found {:?}", expected, other),
                ));
            }
        };
        element.push(Element::new(name).with_text(text));
    }
    Ok(element)
}

fn encode_bbr_config(bbr: &BbrConfig) -> Element {
    let mut element = Element::new(BBR_CONFIG);
    for (name, value) in bbr.iter() {
        element.push(Element::new(name).with_text(value.to_string()));
    }
    element
}

fn encode_complex_element(name: &str, mode: &str, values: &[Complex16]) -> Element {
    let (re, im) = encode_complex_array(values);
    Element::new(name)
        .with_attribute(MODE, mode)
        .with_child(Element::new(REAL).with_text(re))
        .with_child(Element::new(IMAG).with_text(im))
}

/// Decode one `<burst>` element
///
/// # Errors
///
/// - `MissingElement` if `burst_config`, `TD_FD_SELECT`, `E_data`/`B_data`
///   or (frequency domain) their `real`/`imag` children are absent
/// - `InvalidField` for non-integer configuration values, a `TD_FD_SELECT`
///   other than 0 or 1, or malformed samples and GPS fields
/// - `InvalidField` naming `E_data`/`B_data` when the element is laid out for
///   the other domain: child elements under time domain, or text beside
///   `real`/`imag` under frequency domain
pub fn decode_burst_record(element: &Element) -> Result<BurstRecord> {
    let header_timestamp = record_timestamp(element)?;
    let config = decode_burst_config(element.require_child(BURST_CONFIG)?)?;

    let bbr_config = element.child(BBR_CONFIG).map(decode_bbr_config).transpose()?;

    let gps = match element.child(GPS) {
        Some(gps) => gps
            .children_named(GPS_ENTRY)
            .map(decode_gps_fix)
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let td_fd_select = config
        .td_fd_select()
        .ok_or_else(|| TelemetryXmlError::missing_element(TD_FD_SELECT, BURST_CONFIG))?;
    let domain = SampleDomain::from_td_fd_select(td_fd_select).ok_or_else(|| {
        TelemetryXmlError::invalid_field(TD_FD_SELECT, format!("{} is neither 0 nor 1", td_fd_select))
    })?;

    let e_element = element.require_child(E_DATA)?;
    let b_element = element.require_child(B_DATA)?;
    let samples = match domain {
        SampleDomain::TimeDomain => BurstSamples::TimeDomain {
            e: decode_time_element(e_element)?,
            b: decode_time_element(b_element)?,
        },
        SampleDomain::FrequencyDomain => BurstSamples::FrequencyDomain {
            e: decode_complex_element(e_element)?,
            b: decode_complex_element(b_element)?,
        },
    };

    Ok(BurstRecord {
        header_timestamp,
        config,
        bbr_config,
        gps,
        samples,
    })
}

fn decode_burst_config(element: &Element) -> Result<BurstConfig> {
    let mut config = BurstConfig::new();
    for child in &element.children {
        if BurstConfig::is_string_field(&child.name) {
            config.insert_str(child.name.clone(), child.text.clone());
        } else {
            config.insert_int(child.name.clone(), decode_integer(&child.name, &child.text)?);
        }
    }
    Ok(config)
}

fn decode_bbr_config(element: &Element) -> Result<BbrConfig> {
    let mut bbr = BbrConfig::new();
    for child in &element.children {
        bbr.insert(child.name.clone(), decode_integer(&child.name, &child.text)?);
    }
    Ok(bbr)
}

fn decode_time_element(element: &Element) -> Result<Vec<i16>> {
    if element.has_children() {
        return Err(TelemetryXmlError::invalid_field(
            &element.name,
            "time domain samples must be text, found child elements",
        ));
    }
    decode_array::<i16>(&element.name, &element.text)
}

fn decode_complex_element(element: &Element) -> Result<Vec<Complex16>> {
    if !element.text.trim().is_empty() {
        return Err(TelemetryXmlError::invalid_field(
            &element.name,
            "frequency domain samples must be real/imag children, found text",
        ));
    }
    let real = element.require_child(REAL)?;
    let imag = element.require_child(IMAG)?;
    decode_complex_array(&element.name, &real.text, &imag.text)
}

/// Encode a full `burst_data` document
pub fn encode_burst_document(
    records: &[BurstRecord],
    created: DateTime<Utc>,
    observer: &dyn CodecObserver,
) -> Result<String> {
    let xml = encode_document(RecordKind::Burst, records, created, |record| {
        encode_burst_record(record, observer)
    })?;
    observer.on_event(&CodecEvent::DocumentEncoded {
        kind: RecordKind::Burst,
        records: records.len(),
    });
    Ok(xml)
}

/// Decode every `<burst>` element of a `burst_data` document
pub fn decode_burst_document(xml: &str, observer: &dyn CodecObserver) -> Result<Vec<BurstRecord>> {
    let records = decode_document(RecordKind::Burst, xml, |index, element| {
        let record = decode_burst_record(element)?;
        let (e_len, b_len) = record.samples.lens();
        observer.on_event(&CodecEvent::BurstDecoded {
            index,
            domain: record.samples.domain(),
            e_len,
            b_len,
            gps_fixes: record.gps.len(),
        });
        Ok(record)
    })?;

    observer.on_event(&CodecEvent::DocumentDecoded {
        kind: RecordKind::Burst,
        records: records.len(),
    });
    Ok(records)
}
