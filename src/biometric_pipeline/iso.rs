//! ISO 19794 container decoding module
//!
//! Parses 2011-edition finger (19794-4), face (19794-5) and iris (19794-6)
//! records and hands back the embedded image with its declared encoding.

mod decoder;
mod error;
mod iso_record_decoder;
mod record_reader;
pub mod face;
pub mod finger;
pub mod iris;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use decoder::ModalityDecoder;
pub use error::DecodeError;
pub use iso_record_decoder::IsoRecordDecoder;
pub use record_reader::{CaptureDateTime, GeneralHeader, QualityBlock, RepresentationHeader};
pub use types::{DecodedBiometric, FaceImageDataType, FingerCompression, InnerEncoding, IrisImageFormat};
