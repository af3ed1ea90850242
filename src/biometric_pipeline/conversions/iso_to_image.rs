use std::collections::BTreeMap;

use image::DynamicImage;
use tracing::{debug, info, instrument};

use crate::biometric_pipeline::{
    common::base64url,
    common::error::{ConversionError, Result},
    conversions::request::ConversionRequest,
    formats::{FormatRegistry, ImageParameters, Modality, SourceFormat, TargetFormat},
    iso::{
        DecodeError, DecodedBiometric, FaceImageDataType, FingerCompression, InnerEncoding,
        IrisImageFormat, IsoRecordDecoder, ModalityDecoder,
    },
    raster::{ConverterConfig, ImageCodec, StandardImageCodec},
};

/// How an embedded image is turned into a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TranscodePath {
    /// Self-describing container (JPEG2000 and friends).
    Container,
    Wsq,
}

fn transcode_path(encoding: InnerEncoding) -> Result<TranscodePath> {
    let unsupported = |name: String| Err(ConversionError::UnsupportedCompressionType(name));
    match encoding {
        InnerEncoding::Finger(compression) => match compression {
            FingerCompression::Jpeg2000Lossy | FingerCompression::Jpeg2000Lossless => {
                Ok(TranscodePath::Container)
            }
            FingerCompression::Wsq => Ok(TranscodePath::Wsq),
            FingerCompression::Uncompressed
            | FingerCompression::BitPacked
            | FingerCompression::Jpeg
            | FingerCompression::Png
            | FingerCompression::Reserved(_) => unsupported(format!("finger {compression:?}")),
        },
        InnerEncoding::Face(data_type) => match data_type {
            FaceImageDataType::Jpeg2000Lossy | FaceImageDataType::Jpeg2000Lossless => {
                Ok(TranscodePath::Container)
            }
            FaceImageDataType::Jpeg | FaceImageDataType::Png | FaceImageDataType::Reserved(_) => {
                unsupported(format!("face {data_type:?}"))
            }
        },
        InnerEncoding::Iris(format) => match format {
            IrisImageFormat::MonoJpeg2000 => Ok(TranscodePath::Container),
            IrisImageFormat::MonoRaw
            | IrisImageFormat::RgbRaw
            | IrisImageFormat::MonoJpeg
            | IrisImageFormat::RgbJpeg
            | IrisImageFormat::MonoJpegLs
            | IrisImageFormat::RgbJpegLs
            | IrisImageFormat::RgbJpeg2000
            | IrisImageFormat::MonoPng
            | IrisImageFormat::RgbPng
            | IrisImageFormat::Reserved(_) => unsupported(format!("iris {format:?}")),
        },
    }
}

fn invalid_record(modality: Modality, error: DecodeError) -> ConversionError {
    let detail = error.to_string();
    match modality {
        Modality::Finger => ConversionError::SourceNotValidFingerIso(detail),
        Modality::Face => ConversionError::SourceNotValidFaceIso(detail),
        Modality::Iris => ConversionError::SourceNotValidIrisIso(detail),
    }
}

/// Converts base64url ISO 19794 records into base64url JPEG or PNG images.
pub struct IsoToImagePipeline<D: ModalityDecoder, C: ImageCodec> {
    decoder: D,
    codec: C,
    config: ConverterConfig,
}

impl IsoToImagePipeline<IsoRecordDecoder, StandardImageCodec> {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            decoder: IsoRecordDecoder,
            codec: StandardImageCodec,
            config,
        }
    }
}

impl<D: ModalityDecoder, C: ImageCodec> IsoToImagePipeline<D, C> {
    pub fn with_custom(decoder: D, codec: C, config: ConverterConfig) -> Self {
        Self {
            decoder,
            codec,
            config,
        }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::CouldNotReadIsoImageData(format!(
                "invalid image dimensions {width}x{height}"
            )));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                return Err(ConversionError::CouldNotReadIsoImageData(format!(
                    "image dimensions {width}x{height} exceed maximum {max}"
                )));
            }
        }

        Ok(())
    }

    /// Converts every entry of `values`, keyed by the same labels.
    ///
    /// Inputs are validated before any entry is decoded. Entries are then
    /// processed in ascending label order and the first failure aborts the
    /// whole request.
    #[instrument(
        skip_all,
        fields(
            source_format = source_format.unwrap_or_default(),
            target_format = target_format.unwrap_or_default(),
            entries = values.map_or(0, |v| v.len()),
        )
    )]
    pub fn convert(
        &self,
        values: Option<&BTreeMap<String, String>>,
        source_format: Option<&str>,
        target_format: Option<&str>,
        source_parameters: Option<&BTreeMap<String, String>>,
        target_parameters: Option<&BTreeMap<String, String>>,
    ) -> Result<BTreeMap<String, String>> {
        info!("Starting ISO to image conversion");

        let values = values.ok_or(ConversionError::InputSource)?;
        if values.is_empty() {
            return Err(ConversionError::InvalidRequest);
        }
        let (Some(source_code), Some(target_code)) = (source_format, target_format) else {
            return Err(ConversionError::InputSource);
        };
        let (source, target) = FormatRegistry::resolve_pair(source_code, target_code)?;

        let source_parameters = ImageParameters::from_map(source_parameters);
        let target_parameters = ImageParameters::from_map(target_parameters);
        if !source_parameters.is_empty() || !target_parameters.is_empty() {
            info!(
                ?source_parameters,
                ?target_parameters,
                "Conversion parameters recorded, not applied"
            );
        }

        let converted = values
            .iter()
            .map(|(label, value)| {
                let encoded = self.convert_entry(label, value, source, target)?;
                Ok((label.clone(), encoded))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        info!(entries = converted.len(), "Conversion complete");
        Ok(converted)
    }

    /// Runs [`convert`](Self::convert) on a deserialized request body.
    pub fn convert_request(&self, request: &ConversionRequest) -> Result<BTreeMap<String, String>> {
        self.convert(
            request.values.as_ref(),
            request.source_format.as_deref(),
            request.target_format.as_deref(),
            request.source_parameters.as_ref(),
            request.target_parameters.as_ref(),
        )
    }

    fn convert_entry(
        &self,
        label: &str,
        value: &str,
        source: SourceFormat,
        target: TargetFormat,
    ) -> Result<String> {
        if value.trim().is_empty() {
            return Err(ConversionError::SourceValueEmpty);
        }

        let record = {
            let _span = tracing::info_span!("decode_base64", label).entered();
            base64url::decode(value)?
        };

        let modality = FormatRegistry::modality(source);
        let decoded = {
            let _span = tracing::info_span!("decode_iso", %modality, record_size = record.len())
                .entered();
            self.decoder
                .decode(modality, source.code(), &record)
                .map_err(|e| invalid_record(modality, e))?
        };

        let raster = {
            let _span = tracing::info_span!("decode_image", encoding = ?decoded.inner_encoding)
                .entered();
            self.decode_raster(&decoded)?
        };
        self.validate_dimensions(raster.width(), raster.height())?;

        let encoded = {
            let _span = tracing::info_span!("encode_image", %target).entered();
            self.codec.encode_for_target(&raster, target, &self.config)?
        };

        debug!(
            label,
            width = raster.width(),
            height = raster.height(),
            output_size = encoded.len(),
            "Entry converted"
        );
        Ok(base64url::encode(&encoded))
    }

    fn decode_raster(&self, decoded: &DecodedBiometric) -> Result<DynamicImage> {
        match transcode_path(decoded.inner_encoding)? {
            TranscodePath::Container => self.codec.decode_image(&decoded.image_bytes),
            TranscodePath::Wsq => self.codec.decode_wsq(&decoded.image_bytes, &self.config),
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConverterConfig) {
        self.config = config;
    }
}
