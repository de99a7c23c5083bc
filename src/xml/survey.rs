//! # Survey Record Codec
//!
//! Layout of one survey record:
//!
//! ```text
//! <survey header_timestamp="2024-01-01T00:00:00Z">
//!     <E_data>0,12,255,...</E_data>
//!     <B_data>3,0,17,...</B_data>
//!     <GPS>
//!         <lat>37.7749</lat>
//!         ...
//!     </GPS>
//! </survey>
//! ```

use chrono::{DateTime, Utc};

use super::array::{decode_array, encode_array};
use super::document::{decode_document, encode_document, record_element, record_timestamp};
use super::element::Element;
use super::scalar::{decode_numeric, encode_numeric};
use super::{B_DATA, E_DATA, GPS};
use crate::error::Result;
use crate::observer::{CodecEvent, CodecObserver};
use crate::records::{GpsFix, RecordKind, SurveyRecord};

/// Encode one survey record as a `<survey>` element
pub fn encode_survey_record(record: &SurveyRecord) -> Result<Element> {
    let mut element = record_element(RecordKind::Survey, record.header_timestamp)?;
    element.push(Element::new(E_DATA).with_text(encode_array(&record.e_data)));
    element.push(Element::new(B_DATA).with_text(encode_array(&record.b_data)));
    if let Some(gps) = &record.gps {
        element.push(encode_gps_fix(GPS, gps));
    }
    Ok(element)
}

/// Encode a GPS fix as an element named `name` with one child per field
pub fn encode_gps_fix(name: &str, fix: &GpsFix) -> Element {
    let mut element = Element::new(name);
    for (field, value) in fix.iter() {
        element.push(Element::new(field).with_text(encode_numeric(value)));
    }
    element
}

/// Decode the children of a GPS element; every field must be numeric
pub fn decode_gps_fix(element: &Element) -> Result<GpsFix> {
    let mut fix = GpsFix::new();
    for child in &element.children {
        fix.insert(child.name.clone(), decode_numeric(&child.name, &child.text)?);
    }
    Ok(fix)
}

/// Decode one `<survey>` element
///
/// `E_data` and `B_data` are required. An absent or empty `GPS` element
/// decodes to no fix. Array lengths are not checked here.
pub fn decode_survey_record(element: &Element) -> Result<SurveyRecord> {
    let header_timestamp = record_timestamp(element)?;
    let e_data = decode_array::<u8>(E_DATA, &element.require_child(E_DATA)?.text)?;
    let b_data = decode_array::<u8>(B_DATA, &element.require_child(B_DATA)?.text)?;

    let gps = match element.child(GPS) {
        Some(gps) if gps.has_children() => Some(decode_gps_fix(gps)?),
        _ => None,
    };

    Ok(SurveyRecord {
        header_timestamp,
        e_data,
        b_data,
        gps,
    })
}

/// Encode a full `survey_data` document
pub fn encode_survey_document(
    records: &[SurveyRecord],
    created: DateTime<Utc>,
    observer: &dyn CodecObserver,
) -> Result<String> {
    let xml = encode_document(RecordKind::Survey, records, created, encode_survey_record)?;
    observer.on_event(&CodecEvent::DocumentEncoded {
        kind: RecordKind::Survey,
        records: records.len(),
    });
    Ok(xml)
}

/// Decode every `<survey>` element of a `survey_data` document
///
/// With `expected_bins` set, columns of any other length are reported to the
/// observer and still returned.
pub fn decode_survey_document(
    xml: &str,
    expected_bins: Option<usize>,
    observer: &dyn CodecObserver,
) -> Result<Vec<SurveyRecord>> {
    let records = decode_document(RecordKind::Survey, xml, |index, element| {
        let record = decode_survey_record(element)?;
        if let Some(expected) = expected_bins {
            for (field, actual) in [(E_DATA, record.e_data.len()), (B_DATA, record.b_data.len())] {
                if actual != expected {
                    observer.on_event(&CodecEvent::SurveyLengthMismatch {
                        index,
                        field,
                        expected,
                        actual,
                    });
                }
            }
        }
        Ok(record)
    })?;

    observer.on_event(&CodecEvent::DocumentDecoded {
        kind: RecordKind::Survey,
        records: records.len(),
    });
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TelemetryXmlError;
    use crate::observer::{MockCodecObserver, NoopObserver};
    use crate::records::{Numeric, SURVEY_BINS};
    use crate::xml::element::parse_document;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn column(seed: u8) -> Vec<u8> {
        (0..SURVEY_BINS).map(|i| (i as u8).wrapping_mul(seed)).collect()
    }

    fn gps_fix() -> GpsFix {
        GpsFix::new()
            .with("lat", 37.7749)
            .with("lon", -122.4194)
            .with("alt", 12.0)
            .with("solution_status", 0i64)
            .with("time_status", 180i64)
            .with("weeknum", 2300i64)
    }

    #[test]
    fn test_survey_round_trip() {
        let records = vec![
            SurveyRecord::new(1_700_000_010.25, column(3), column(5)).with_gps(gps_fix()),
            SurveyRecord::new(1_700_000_000.0, column(7), column(11)).with_gps(gps_fix()),
        ];

        let xml = encode_survey_document(&records, created(), &NoopObserver).unwrap();
        let decoded = decode_survey_document(&xml, Some(SURVEY_BINS), &NoopObserver).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], records[1]);
        assert_eq!(decoded[1], records[0]);
    }

    #[test]
    fn test_survey_written_in_timestamp_order() {
        let records: Vec<SurveyRecord> = [30.0, 10.0, 20.0, 10.0]
            .iter()
            .map(|&t| SurveyRecord::new(t, vec![1], vec![2]))
            .collect();

        let xml = encode_survey_document(&records, created(), &NoopObserver).unwrap();
        let decoded = decode_survey_document(&xml, None, &NoopObserver).unwrap();
        let times: Vec<f64> = decoded.iter().map(|r| r.header_timestamp).collect();
        assert_eq!(times, vec![10.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_empty_arrays_round_trip() {
        let record = SurveyRecord::new(100.0, Vec::new(), Vec::new());
        let element = encode_survey_record(&record).unwrap();
        assert_eq!(element.child(E_DATA).unwrap().text, "");

        let xml = encode_survey_document(&[record.clone()], created(), &NoopObserver).unwrap();
        let decoded = decode_survey_document(&xml, None, &NoopObserver).unwrap();
        assert_eq!(decoded, vec![record]);
    }

    #[test]
    fn test_gps_numeric_inference() {
        let el = parse_document("<GPS><lat>37.5</lat><weeknum>2300</weeknum></GPS>").unwrap();
        let fix = decode_gps_fix(&el).unwrap();
        assert_eq!(fix.get("lat"), Some(Numeric::Float(37.5)));
        assert_eq!(fix.get("weeknum"), Some(Numeric::Int(2300)));

        let el = parse_document("<GPS><lat>north</lat></GPS>").unwrap();
        assert!(decode_gps_fix(&el).is_err());
    }

    #[test]
    fn test_missing_or_empty_gps_is_none() {
        let el = parse_document(
            r#"<survey header_timestamp="2024-01-01T00:00:00Z"><E_data>1</E_data><B_data>2</B_data><GPS/></survey>"#,
        )
        .unwrap();
        assert_eq!(decode_survey_record(&el).unwrap().gps, None);

        let el = parse_document(
            r#"<survey header_timestamp="2024-01-01T00:00:00Z"><E_data>1</E_data><B_data>2</B_data></survey>"#,
        )
        .unwrap();
        assert_eq!(decode_survey_record(&el).unwrap().gps, None);
    }

    #[test]
    fn test_missing_b_data_is_structural_error() {
        let el = parse_document(r#"<survey header_timestamp="2024-01-01T00:00:00Z"><E_data>1</E_data></survey>"#)
            .unwrap();
        match decode_survey_record(&el) {
            Err(TelemetryXmlError::MissingElement { element, parent }) => {
                assert_eq!(element, "B_data");
                assert_eq!(parent, "survey");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_short_column_accepted_and_reported() {
        let records = vec![SurveyRecord::new(1.0, vec![1, 2, 3], column(1))];
        let xml = encode_survey_document(&records, created(), &NoopObserver).unwrap();

        let mut observer = MockCodecObserver::new();
        observer
            .expect_on_event()
            .withf(|event| {
                matches!(
                    event,
                    CodecEvent::SurveyLengthMismatch { index: 0, field: "E_data", expected: 512, actual: 3 }
                )
            })
            .times(1)
            .return_const(());
        observer
            .expect_on_event()
            .withf(|event| matches!(event, CodecEvent::DocumentDecoded { records: 1, .. }))
            .times(1)
            .return_const(());

        let decoded = decode_survey_document(&xml, Some(SURVEY_BINS), &observer).unwrap();
        assert_eq!(decoded[0].e_data, vec![1, 2, 3]);
    }
}
