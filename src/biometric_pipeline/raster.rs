//! Raster codec module
//!
//! This module decodes the images embedded in ISO records (JPEG2000, WSQ and
//! the common container formats) and encodes them as JPEG or PNG.

mod codec;
mod standard_codec;
pub mod types;

pub use codec::ImageCodec;
pub use standard_codec::StandardImageCodec;
pub use types::{ConverterConfig, ConverterConfigBuilder, PngCompression};
