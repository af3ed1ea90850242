//! Target format codes.
//!
//! Only `IMAGE/JPEG` and `IMAGE/PNG` have a raster encoding today. The
//! `ISO19794_x_2011/<raster>` codes describe re-embedding the raster into an
//! ISO record; they pass code validation but have no encoder.

use std::fmt;
use std::str::FromStr;

use crate::biometric_pipeline::common::error::{ConversionError, Result};

/// Raster encodings the transcoder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    Jpeg,
    Png,
}

impl RasterFormat {
    /// Leading bytes of an encoded file.
    pub const fn magic(&self) -> &'static [u8] {
        match self {
            RasterFormat::Jpeg => &[0xFF, 0xD8, 0xFF, 0xE0],
            RasterFormat::Png => &[0x89, 0x50, 0x4E, 0x47],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    ImageJpeg,
    ImagePng,
    FingerIsoJpeg,
    FaceIsoJpeg,
    IrisIsoJpeg,
    FingerIsoPng,
    FaceIsoPng,
    IrisIsoPng,
}

impl TargetFormat {
    pub const ALL: [TargetFormat; 8] = [
        TargetFormat::ImageJpeg,
        TargetFormat::ImagePng,
        TargetFormat::FingerIsoJpeg,
        TargetFormat::FaceIsoJpeg,
        TargetFormat::IrisIsoJpeg,
        TargetFormat::FingerIsoPng,
        TargetFormat::FaceIsoPng,
        TargetFormat::IrisIsoPng,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            TargetFormat::ImageJpeg => "IMAGE/JPEG",
            TargetFormat::ImagePng => "IMAGE/PNG",
            TargetFormat::FingerIsoJpeg => "ISO19794_4_2011/JPEG",
            TargetFormat::FaceIsoJpeg => "ISO19794_5_2011/JPEG",
            TargetFormat::IrisIsoJpeg => "ISO19794_6_2011/JPEG",
            TargetFormat::FingerIsoPng => "ISO19794_4_2011/PNG",
            TargetFormat::FaceIsoPng => "ISO19794_5_2011/PNG",
            TargetFormat::IrisIsoPng => "ISO19794_6_2011/PNG",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            TargetFormat::ImageJpeg => "jpeg format",
            TargetFormat::ImagePng => "png format",
            TargetFormat::FingerIsoJpeg => "Finger ISO format to Finger ISO format with JPEG IMAGE",
            TargetFormat::FaceIsoJpeg => "Face ISO format to Face ISO format with JPEG IMAGE",
            TargetFormat::IrisIsoJpeg => "Iris ISO format to Iris ISO format with JPEG IMAGE",
            TargetFormat::FingerIsoPng => "Finger ISO format to Finger ISO format with PNG IMAGE",
            TargetFormat::FaceIsoPng => "Face ISO format to Face ISO format with PNG IMAGE",
            TargetFormat::IrisIsoPng => "Iris ISO format to Iris ISO format with PNG IMAGE",
        }
    }

    /// The raster encoding written for this target, if it has one.
    pub const fn raster(&self) -> Option<RasterFormat> {
        match self {
            TargetFormat::ImageJpeg => Some(RasterFormat::Jpeg),
            TargetFormat::ImagePng => Some(RasterFormat::Png),
            TargetFormat::FingerIsoJpeg
            | TargetFormat::FaceIsoJpeg
            | TargetFormat::IrisIsoJpeg
            | TargetFormat::FingerIsoPng
            | TargetFormat::FaceIsoPng
            | TargetFormat::IrisIsoPng => None,
        }
    }

    /// Case-insensitive lookup.
    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.code().eq_ignore_ascii_case(code))
            .ok_or(ConversionError::InvalidTargetFormat)
    }

    pub fn is_valid_code(code: &str) -> bool {
        Self::from_code(code).is_ok()
    }
}

impl FromStr for TargetFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
