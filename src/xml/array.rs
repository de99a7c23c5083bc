//! # Numeric Array Codec
//!
//! Dense comma-separated text for fixed-width integer sample arrays. The text
//! is never wrapped or abbreviated: decoding splits on commas only.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Result, TelemetryXmlError};
use crate::records::Complex16;

/// Array element delimiter
pub const DELIMITER: char = ',';

/// Fixed-width integer sample type
pub trait Sample: Copy + Display + FromStr {
    /// Element type name used in error messages
    const DTYPE: &'static str;
}

impl Sample for u8 {
    const DTYPE: &'static str = "uint8";
}

impl Sample for i16 {
    const DTYPE: &'static str = "int16";
}

/// Encode samples as `v0,v1,...` with no whitespace
pub fn encode_array<T: Sample>(values: &[T]) -> String {
    let mut out = String::with_capacity(values.len() * 4);
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(&v.to_string());
    }
    out
}

/// Decode comma-separated samples for the field `field`
///
/// Empty or whitespace-only text is an empty array. Tokens are trimmed, and a
/// single trailing delimiter is accepted.
///
/// # Errors
///
/// Returns `InvalidField` if any token is empty or does not parse as `T`
/// (including out-of-range values).
pub fn decode_array<T: Sample>(field: &str, text: &str) -> Result<Vec<T>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let text = text.strip_suffix(DELIMITER).unwrap_or(text);

    text.split(DELIMITER)
        .enumerate()
        .map(|(i, token)| {
            let token = token.trim();
            token.parse::<T>().map_err(|_| {
                TelemetryXmlError::invalid_field(
                    field,
                    format!("element {} ('{}') is not a valid {}", i, token, T::DTYPE),
                )
            })
        })
        .collect()
}

/// Encode complex samples as separate real and imaginary component texts
pub fn encode_complex_array(values: &[Complex16]) -> (String, String) {
    let re: Vec<i16> = values.iter().map(|c| c.re).collect();
    let im: Vec<i16> = values.iter().map(|c| c.im).collect();
    (encode_array(&re), encode_array(&im))
}

/// Decode and pair up real and imaginary component texts
///
/// # Errors
///
/// Returns `InvalidField` if either component fails to decode or the two
/// components have different lengths.
pub fn decode_complex_array(field: &str, real: &str, imag: &str) -> Result<Vec<Complex16>> {
    let re = decode_array::<i16>(field, real)?;
    let im = decode_array::<i16>(field, imag)?;
    if re.len() != im.len() {
        return Err(TelemetryXmlError::invalid_field(
            field,
            format!("{} real components but {} imaginary components", re.len(), im.len()),
        ));
    }
    Ok(re
        .into_iter()
        .zip(im)
        .map(|(re, im)| Complex16::new(re, im))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_dense() {
        assert_eq!(encode_array(&[1u8, 2, 255]), "1,2,255");
        assert_eq!(encode_array(&[-32768i16, 0, 32767]), "-32768,0,32767");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_array::<u8>(&[]), "");
        assert_eq!(decode_array::<u8>("E_data", "").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_array::<u8>("E_data", " \n\t").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_long_array_is_single_line() {
        let values: Vec<u8> = (0..4096).map(|i| (i % 256) as u8).collect();
        let text = encode_array(&values);
        assert!(!text.contains('\n'));
        assert!(!text.contains(' '));
        assert_eq!(decode_array::<u8>("E_data", &text).unwrap(), values);
    }

    #[test]
    fn test_decode_tolerates_spacing_and_trailing_delimiter() {
        assert_eq!(decode_array::<i16>("E", " 1, -2 ,3 ").unwrap(), vec![1, -2, 3]);
        assert_eq!(decode_array::<u8>("E_data", "1,2,").unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_decode_rejects_bad_tokens() {
        assert!(decode_array::<u8>("E_data", "1,,2").is_err());
        assert!(decode_array::<u8>("E_data", "1,256").is_err());
        assert!(decode_array::<i16>("E", "1,40000").is_err());
        assert!(decode_array::<i16>("E", "1,2.5").is_err());
        match decode_array::<u8>("B_data", "7,x") {
            Err(TelemetryXmlError::InvalidField { field, reason }) => {
                assert_eq!(field, "B_data");
                assert!(reason.contains("uint8"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_complex_split_and_recombine() {
        let (re, im) = encode_complex_array(&[Complex16::new(3, 4)]);
        assert_eq!(re, "3");
        assert_eq!(im, "4");
        assert_eq!(decode_complex_array("E", &re, &im).unwrap(), vec![Complex16::new(3, 4)]);
    }

    #[test]
    fn test_complex_length_mismatch() {
        assert!(decode_complex_array("B", "1,2", "3").is_err());
    }
}
