//! ISO/IEC 19794-4:2011 finger image records.

use crate::biometric_pipeline::iso::error::DecodeError;
use crate::biometric_pipeline::iso::record_reader::{GeneralHeader, RecordReader, RepresentationHeader};
use crate::biometric_pipeline::iso::types::FingerCompression;

pub const FORMAT_ID: &str = "FIR\0";
pub const VERSION: &str = "020\0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerRepresentation {
    pub header: RepresentationHeader,
    pub position: u8,
    pub representation_number: u8,
    pub scale_units: u8,
    pub capture_sampling_rate: (u16, u16),
    pub image_sampling_rate: (u16, u16),
    pub bit_depth: u8,
    pub compression: FingerCompression,
    pub impression_type: u8,
    pub line_length: (u16, u16),
    pub image_data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerRecord {
    pub general: GeneralHeader,
    pub finger_positions: u8,
    pub representation: FingerRepresentation,
}

impl FingerRecord {
    /// Parses the general header and the first representation.
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = RecordReader::new(data);
        let general = GeneralHeader::read(&mut reader, FORMAT_ID, VERSION)?;
        let finger_positions = reader.u8()?;

        let header = RepresentationHeader::read(&mut reader, general.certification_flag)?;
        let position = reader.u8()?;
        let representation_number = reader.u8()?;
        let scale_units = reader.u8()?;
        let capture_sampling_rate = (reader.u16()?, reader.u16()?);
        let image_sampling_rate = (reader.u16()?, reader.u16()?);
        let bit_depth = reader.u8()?;
        let compression = FingerCompression::from_byte(reader.u8()?);
        let impression_type = reader.u8()?;
        let line_length = (reader.u16()?, reader.u16()?);
        let image_data = reader.length_prefixed("finger image data")?.to_vec();

        Ok(Self {
            general,
            finger_positions,
            representation: FingerRepresentation {
                header,
                position,
                representation_number,
                scale_units,
                capture_sampling_rate,
                image_sampling_rate,
                bit_depth,
                compression,
                impression_type,
                line_length,
                image_data,
            },
        })
    }
}
