//! ISO/IEC 19794-5:2011 face image records.

use crate::biometric_pipeline::iso::error::DecodeError;
use crate::biometric_pipeline::iso::record_reader::{GeneralHeader, RecordReader, RepresentationHeader};
use crate::biometric_pipeline::iso::types::FaceImageDataType;

pub const FORMAT_ID: &str = "FAC\0";
pub const VERSION: &str = "030\0";

const LANDMARK_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacialInformation {
    pub gender: u8,
    pub eye_colour: u8,
    pub hair_colour: u8,
    pub subject_height: u8,
    pub property_mask: u32,
    pub expression: u16,
    pub pose_angle: [u8; 3],
    pub pose_angle_uncertainty: [u8; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceImageInformation {
    pub face_image_type: u8,
    pub data_type: FaceImageDataType,
    pub width: u16,
    pub height: u16,
    pub spatial_sampling_level: u8,
    pub post_acquisition_processing: u16,
    pub cross_reference: u8,
    pub colour_space: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceRepresentation {
    pub header: RepresentationHeader,
    pub landmark_count: u16,
    pub facial: FacialInformation,
    pub image_information: FaceImageInformation,
    pub image_data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceRecord {
    pub general: GeneralHeader,
    pub temporal_semantics: u16,
    pub representation: FaceRepresentation,
}

impl FaceRecord {
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = RecordReader::new(data);
        let general = GeneralHeader::read(&mut reader, FORMAT_ID, VERSION)?;
        let temporal_semantics = reader.u16()?;

        let header = RepresentationHeader::read(&mut reader, false)?;
        let landmark_count = reader.u16()?;

        let gender = reader.u8()?;
        let eye_colour = reader.u8()?;
        let hair_colour = reader.u8()?;
        let subject_height = reader.u8()?;
        let mask = reader.take(3)?;
        let property_mask = u32::from_be_bytes([0, mask[0], mask[1], mask[2]]);
        let expression = reader.u16()?;
        let mut pose_angle = [0u8; 3];
        pose_angle.copy_from_slice(reader.take(3)?);
        let mut pose_angle_uncertainty = [0u8; 3];
        pose_angle_uncertainty.copy_from_slice(reader.take(3)?);

        reader.skip(landmark_count as usize * LANDMARK_LEN)?;

        let image_information = FaceImageInformation {
            face_image_type: reader.u8()?,
            data_type: FaceImageDataType::from_byte(reader.u8()?),
            width: reader.u16()?,
            height: reader.u16()?,
            spatial_sampling_level: reader.u8()?,
            post_acquisition_processing: reader.u16()?,
            cross_reference: reader.u8()?,
            colour_space: reader.u8()?,
        };
        let image_data = reader.length_prefixed("face image data")?.to_vec();

        Ok(Self {
            general,
            temporal_semantics,
            representation: FaceRepresentation {
                header,
                landmark_count,
                facial: FacialInformation {
                    gender,
                    eye_colour,
                    hair_colour,
                    subject_height,
                    property_mask,
                    expression,
                    pose_angle,
                    pose_angle_uncertainty,
                },
                image_information,
                image_data,
            },
        })
    }
}
