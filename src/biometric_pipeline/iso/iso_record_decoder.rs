//! ModalityDecoder for ISO 19794 2011-edition records.

use tracing::debug;

use crate::biometric_pipeline::formats::{Modality, SourceFormat};
use crate::biometric_pipeline::iso::decoder::ModalityDecoder;
use crate::biometric_pipeline::iso::error::DecodeError;
use crate::biometric_pipeline::iso::face::FaceRecord;
use crate::biometric_pipeline::iso::finger::FingerRecord;
use crate::biometric_pipeline::iso::iris::IrisRecord;
use crate::biometric_pipeline::iso::types::{DecodedBiometric, InnerEncoding};

/// Parses finger, face and iris records and returns the image embedded in
/// their first representation.
pub struct IsoRecordDecoder;

impl IsoRecordDecoder {
    fn expected_version(modality: Modality) -> &'static str {
        match modality {
            Modality::Finger => SourceFormat::FingerIso2011.code(),
            Modality::Face => SourceFormat::FaceIso2011.code(),
            Modality::Iris => SourceFormat::IrisIso2011.code(),
        }
    }
}

impl ModalityDecoder for IsoRecordDecoder {
    fn decode(
        &self,
        modality: Modality,
        version: &str,
        data: &[u8],
    ) -> Result<DecodedBiometric, DecodeError> {
        let expected = Self::expected_version(modality);
        if !version.eq_ignore_ascii_case(expected) {
            return Err(DecodeError::UnsupportedVersion {
                expected,
                found: version.to_string(),
            });
        }

        let decoded = match modality {
            Modality::Finger => {
                let record = FingerRecord::parse(data)?;
                let rep = record.representation;
                debug!(
                    position = rep.position,
                    compression = ?rep.compression,
                    width = rep.line_length.0,
                    height = rep.line_length.1,
                    "Decoded finger representation"
                );
                DecodedBiometric {
                    inner_encoding: InnerEncoding::Finger(rep.compression),
                    image_bytes: rep.image_data,
                }
            }
            Modality::Face => {
                let record = FaceRecord::parse(data)?;
                let rep = record.representation;
                debug!(
                    data_type = ?rep.image_information.data_type,
                    width = rep.image_information.width,
                    height = rep.image_information.height,
                    "Decoded face representation"
                );
                DecodedBiometric {
                    inner_encoding: InnerEncoding::Face(rep.image_information.data_type),
                    image_bytes: rep.image_data,
                }
            }
            Modality::Iris => {
                let record = IrisRecord::parse(data)?;
                let rep = record.representation;
                debug!(
                    eye_label = rep.eye_label,
                    format = ?rep.image_format,
                    width = rep.width,
                    height = rep.height,
                    "Decoded iris representation"
                );
                DecodedBiometric {
                    inner_encoding: InnerEncoding::Iris(rep.image_format),
                    image_bytes: rep.image_data,
                }
            }
        };

        Ok(decoded)
    }
}
