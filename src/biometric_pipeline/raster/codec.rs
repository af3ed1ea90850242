use image::DynamicImage;

use crate::biometric_pipeline::common::error::{ConversionError, Result};
use crate::biometric_pipeline::formats::{RasterFormat, TargetFormat};
use crate::biometric_pipeline::raster::types::ConverterConfig;

pub trait ImageCodec {
    /// Decodes a self-describing container (JPEG2000, JPEG, PNG, ...).
    fn decode_image(&self, data: &[u8]) -> Result<DynamicImage>;

    /// Decodes a WSQ codestream. Frames larger than the configured maximum
    /// dimension are rejected before decoding.
    fn decode_wsq(&self, data: &[u8], config: &ConverterConfig) -> Result<DynamicImage>;

    fn encode_image(
        &self,
        image: &DynamicImage,
        format: RasterFormat,
        config: &ConverterConfig,
    ) -> Result<Vec<u8>>;

    /// Encodes for a target code. Targets without a raster encoding are
    /// rejected.
    fn encode_for_target(
        &self,
        image: &DynamicImage,
        target: TargetFormat,
        config: &ConverterConfig,
    ) -> Result<Vec<u8>> {
        let format = target.raster().ok_or(ConversionError::InvalidTargetFormat)?;
        self.encode_image(image, format, config)
    }
}
