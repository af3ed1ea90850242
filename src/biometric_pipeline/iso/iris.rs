//! ISO/IEC 19794-6:2011 iris image records.

use crate::biometric_pipeline::iso::error::DecodeError;
use crate::biometric_pipeline::iso::record_reader::{GeneralHeader, RecordReader, RepresentationHeader};
use crate::biometric_pipeline::iso::types::IrisImageFormat;

pub const FORMAT_ID: &str = "IIR\0";
pub const VERSION: &str = "020\0";

/// Smallest/largest bounds of the iris centre and diameter, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IrisGeometry {
    pub centre_x: (u16, u16),
    pub centre_y: (u16, u16),
    pub diameter: (u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrisRepresentation {
    pub header: RepresentationHeader,
    pub representation_number: u16,
    pub eye_label: u8,
    pub image_type: u8,
    pub image_format: IrisImageFormat,
    pub image_properties: u8,
    pub width: u16,
    pub height: u16,
    pub bit_depth: u8,
    pub range: u16,
    pub roll_angle: u16,
    pub roll_angle_uncertainty: u16,
    pub geometry: IrisGeometry,
    pub image_data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrisRecord {
    pub general: GeneralHeader,
    pub eye_count: u8,
    pub representation: IrisRepresentation,
}

impl IrisRecord {
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = RecordReader::new(data);
        let general = GeneralHeader::read(&mut reader, FORMAT_ID, VERSION)?;
        let eye_count = reader.u8()?;

        let header = RepresentationHeader::read(&mut reader, false)?;
        let representation_number = reader.u16()?;
        let eye_label = reader.u8()?;
        let image_type = reader.u8()?;
        let image_format = IrisImageFormat::from_byte(reader.u8()?);
        let image_properties = reader.u8()?;
        let width = reader.u16()?;
        let height = reader.u16()?;
        let bit_depth = reader.u8()?;
        let range = reader.u16()?;
        let roll_angle = reader.u16()?;
        let roll_angle_uncertainty = reader.u16()?;
        let geometry = IrisGeometry {
            centre_x: (reader.u16()?, reader.u16()?),
            centre_y: (reader.u16()?, reader.u16()?),
            diameter: (reader.u16()?, reader.u16()?),
        };
        let image_data = reader.length_prefixed("iris image data")?.to_vec();

        Ok(Self {
            general,
            eye_count,
            representation: IrisRepresentation {
                header,
                representation_number,
                eye_label,
                image_type,
                image_format,
                image_properties,
                width,
                height,
                bit_depth,
                range,
                roll_angle,
                roll_angle_uncertainty,
                geometry,
                image_data,
            },
        })
    }
}
