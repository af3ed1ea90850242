use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, GrayImage, RgbImage};
use tracing::debug;

use crate::biometric_pipeline::common::error::{ConversionError, Result};
use crate::biometric_pipeline::formats::RasterFormat;
use crate::biometric_pipeline::raster::codec::ImageCodec;
use crate::biometric_pipeline::raster::types::{ConverterConfig, PngCompression};
use crate::biometric_pipeline::wsq;

const JP2_SIGNATURE: [u8; 8] = [0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20];
const J2K_CODESTREAM: [u8; 4] = [0xFF, 0x4F, 0xFF, 0x51];

/// Decodes JPEG2000 through OpenJPEG, WSQ natively and everything else with
/// the `image` crate. Encodes JPEG and PNG.
pub struct StandardImageCodec;

fn is_jpeg2000(data: &[u8]) -> bool {
    data.starts_with(&JP2_SIGNATURE) || data.starts_with(&J2K_CODESTREAM)
}

/// Rescales one component plane to 8 bits.
fn to_8bit(samples: &[i32], precision: u32, signed: bool) -> Vec<u8> {
    let precision = precision.clamp(1, 31);
    let offset = if signed { 1i64 << (precision - 1) } else { 0 };
    let max = (1i64 << precision) - 1;
    samples
        .iter()
        .map(|&sample| {
            let value = (i64::from(sample) + offset).clamp(0, max);
            ((value * 255 + max / 2) / max) as u8
        })
        .collect()
}

fn decode_jpeg2000(data: &[u8]) -> Result<DynamicImage> {
    let image = jpeg2k::Image::from_bytes(data)
        .map_err(|e| ConversionError::CouldNotReadIsoImageData(e.to_string()))?;
    let components = image.components();

    let first = components.first().ok_or_else(|| {
        ConversionError::CouldNotReadIsoImageData("JPEG2000 image has no components".to_string())
    })?;
    let (width, height) = (first.width(), first.height());

    let channels = if components.len() >= 3 { 3 } else { 1 };
    let mut planes = Vec::with_capacity(channels);
    for component in components.iter().take(channels) {
        if component.width() != width || component.height() != height {
            return Err(ConversionError::CouldNotReadIsoImageData(
                "JPEG2000 components have different dimensions".to_string(),
            ));
        }
        planes.push(to_8bit(
            component.data(),
            component.precision(),
            component.is_signed(),
        ));
    }
    debug!(width, height, components = components.len(), "Decoded JPEG2000 image");

    let truncated = || {
        ConversionError::CouldNotReadIsoImageData("JPEG2000 component data is truncated".to_string())
    };
    match planes.as_slice() {
        [gray] => GrayImage::from_raw(width, height, gray.clone())
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(truncated),
        [r, g, b] => {
            let interleaved: Vec<u8> = r
                .iter()
                .zip(g)
                .zip(b)
                .flat_map(|((&r, &g), &b)| [r, g, b])
                .collect();
            RgbImage::from_raw(width, height, interleaved)
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(truncated)
        }
        _ => Err(truncated()),
    }
}

impl ImageCodec for StandardImageCodec {
    fn decode_image(&self, data: &[u8]) -> Result<DynamicImage> {
        if is_jpeg2000(data) {
            return decode_jpeg2000(data);
        }
        image::load_from_memory(data)
            .map_err(|e| ConversionError::CouldNotReadIsoImageData(e.to_string()))
    }

    fn decode_wsq(&self, data: &[u8], config: &ConverterConfig) -> Result<DynamicImage> {
        let limit = config
            .validate_dimensions
            .then_some(config.max_dimension)
            .flatten();
        wsq::decode_with_limit(data, limit)
            .map(DynamicImage::ImageLuma8)
            .map_err(|e| ConversionError::CouldNotReadIsoImageData(e.to_string()))
    }

    fn encode_image(
        &self,
        image: &DynamicImage,
        format: RasterFormat,
        config: &ConverterConfig,
    ) -> Result<Vec<u8>> {
        debug!(
            "Encoding {:?} image: {}x{}",
            format,
            image.width(),
            image.height()
        );

        let mut buffer = Vec::new();
        match format {
            RasterFormat::Jpeg => {
                // Baseline JPEG carries 8-bit gray or RGB only.
                let flattened = if image.color().has_color() {
                    DynamicImage::ImageRgb8(image.to_rgb8())
                } else {
                    DynamicImage::ImageLuma8(image.to_luma8())
                };
                let encoder =
                    JpegEncoder::new_with_quality(&mut buffer, config.jpeg_quality.clamp(1, 100));
                flattened.write_with_encoder(encoder)
            }
            RasterFormat::Png => {
                let compression = match config.png_compression {
                    PngCompression::Default => CompressionType::Default,
                    PngCompression::Fast => CompressionType::Fast,
                    PngCompression::Best => CompressionType::Best,
                };
                let encoder =
                    PngEncoder::new_with_quality(&mut buffer, compression, FilterType::Adaptive);
                image.write_with_encoder(encoder)
            }
        }
        .map_err(|e| ConversionError::Technical(e.to_string()))?;

        debug!(bytes = buffer.len(), "Encoding complete");
        Ok(buffer)
    }
}
