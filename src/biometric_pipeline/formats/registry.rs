use tracing::debug;

use crate::biometric_pipeline::common::error::{ConversionError, Result};
use crate::biometric_pipeline::formats::source::{Modality, SourceFormat};
use crate::biometric_pipeline::formats::target::TargetFormat;

/// Declared-but-disallowed (source, target) combinations.
const UNSUPPORTED_PAIRS: &[(SourceFormat, TargetFormat)] =
    &[(SourceFormat::IrisIso2011, TargetFormat::IrisIsoJpeg)];

/// Lookup over the compile-time format tables.
pub struct FormatRegistry;

impl FormatRegistry {
    pub fn source_formats() -> &'static [SourceFormat] {
        &SourceFormat::ALL
    }

    pub fn target_formats() -> &'static [TargetFormat] {
        &TargetFormat::ALL
    }

    pub fn source(code: &str) -> Result<SourceFormat> {
        SourceFormat::from_code(code)
    }

    pub fn target(code: &str) -> Result<TargetFormat> {
        TargetFormat::from_code(code)
    }

    pub fn modality(source: SourceFormat) -> Modality {
        source.modality()
    }

    pub fn is_supported(source: SourceFormat, target: TargetFormat) -> bool {
        !UNSUPPORTED_PAIRS.contains(&(source, target))
    }

    /// Resolves both codes and rejects disallowed combinations.
    pub fn resolve_pair(source_code: &str, target_code: &str) -> Result<(SourceFormat, TargetFormat)> {
        let source = Self::source(source_code)?;
        let target = Self::target(target_code)?;

        if !Self::is_supported(source, target) {
            debug!(source = %source, target = %target, "Rejected format combination");
            return Err(ConversionError::UnsupportedTargetForSource {
                source_format: source.code().to_string(),
                target_format: target.code().to_string(),
            });
        }

        Ok((source, target))
    }
}
