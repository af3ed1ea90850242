//! Source format codes and their biometric modality.

use std::fmt;
use std::str::FromStr;

use crate::biometric_pipeline::common::error::{ConversionError, Result};

/// Biometric modality carried by an ISO 19794 record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Finger,
    Face,
    Iris,
}

impl Modality {
    pub fn name(&self) -> &'static str {
        match self {
            Modality::Finger => "Finger",
            Modality::Face => "Face",
            Modality::Iris => "Iris",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// ISO/IEC 19794-4:2011 finger image record
    FingerIso2011,
    /// ISO/IEC 19794-5:2011 face image record
    FaceIso2011,
    /// ISO/IEC 19794-6:2011 iris image record
    IrisIso2011,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 3] = [
        SourceFormat::FingerIso2011,
        SourceFormat::FaceIso2011,
        SourceFormat::IrisIso2011,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            SourceFormat::FingerIso2011 => "ISO19794_4_2011",
            SourceFormat::FaceIso2011 => "ISO19794_5_2011",
            SourceFormat::IrisIso2011 => "ISO19794_6_2011",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            SourceFormat::FingerIso2011 => "Finger ISO format",
            SourceFormat::FaceIso2011 => "Face ISO format",
            SourceFormat::IrisIso2011 => "Iris ISO format",
        }
    }

    pub const fn modality(&self) -> Modality {
        match self {
            SourceFormat::FingerIso2011 => Modality::Finger,
            SourceFormat::FaceIso2011 => Modality::Face,
            SourceFormat::IrisIso2011 => Modality::Iris,
        }
    }

    /// Case-insensitive lookup.
    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.code().eq_ignore_ascii_case(code))
            .ok_or(ConversionError::InvalidSourceFormat)
    }

    pub fn is_valid_code(code: &str) -> bool {
        Self::from_code(code).is_ok()
    }
}

impl FromStr for SourceFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
