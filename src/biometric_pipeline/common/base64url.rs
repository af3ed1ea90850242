//! URL-safe base64 used on both sides of the conversion.
//!
//! Input accepts padded and unpadded text; output is always unpadded.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::biometric_pipeline::common::error::{ConversionError, Result};

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn decode(value: &str) -> Result<Vec<u8>> {
    URL_SAFE_LENIENT
        .decode(value.trim())
        .map_err(|e| ConversionError::SourceNotValidBase64(e.to_string()))
}

pub fn encode(data: &[u8]) -> String {
    URL_SAFE_LENIENT.encode(data)
}
