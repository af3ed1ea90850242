use crate::biometric_pipeline::formats::Modality;
use crate::biometric_pipeline::iso::error::DecodeError;
use crate::biometric_pipeline::iso::types::DecodedBiometric;

pub trait ModalityDecoder {
    /// `version` is the source format code the record claims to follow,
    /// e.g. `ISO19794_4_2011`.
    fn decode(
        &self,
        modality: Modality,
        version: &str,
        data: &[u8],
    ) -> Result<DecodedBiometric, DecodeError>;
}
