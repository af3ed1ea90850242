//! Pipeline conversions module
//!
//! This module contains the orchestration from base64url ISO records to
//! base64url raster images, and the JSON envelopes it is exposed through.

mod iso_to_image;
pub mod request;

#[cfg(test)]
mod tests;

pub use iso_to_image::IsoToImagePipeline;
pub use request::{ConversionRequest, RequestEnvelope, ResponseEnvelope, ServiceError};
