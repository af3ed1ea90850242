//! Biometric conversion pipeline module
//!
//! This module provides a structured approach to converting ISO 19794 biometric
//! records into raster images, with separate modules for the format registry,
//! ISO record parsing, WSQ decoding, raster encoding, and conversion orchestration.

pub mod common;
pub mod conversions;
pub mod formats;
pub mod iso;
pub mod raster;
pub mod wsq;

pub use common::{ConversionError, ErrorCode, Result};

pub use formats::{FormatRegistry, ImageParameters, Modality, RasterFormat, SourceFormat, TargetFormat};

pub use iso::{DecodedBiometric, InnerEncoding, IsoRecordDecoder, ModalityDecoder};

pub use raster::{ConverterConfig, ConverterConfigBuilder, ImageCodec, PngCompression, StandardImageCodec};

pub use conversions::{ConversionRequest, IsoToImagePipeline, RequestEnvelope, ResponseEnvelope};
