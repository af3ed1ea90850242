//! Raster encoding configuration types

use std::fmt;
use std::str::FromStr;

/// PNG deflate effort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    /// Balanced speed and size (default)
    #[default]
    Default,
    /// Fastest encoding, larger files
    Fast,
    /// Smallest files, slower
    Best,
}

impl FromStr for PngCompression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(PngCompression::Default),
            "fast" => Ok(PngCompression::Fast),
            "best" => Ok(PngCompression::Best),
            other => Err(format!(
                "unknown PNG compression '{other}', expected default, fast or best"
            )),
        }
    }
}

impl fmt::Display for PngCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PngCompression::Default => "default",
            PngCompression::Fast => "fast",
            PngCompression::Best => "best",
        })
    }
}

/// Configuration for ISO record to raster conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
    /// PNG compression level
    pub png_compression: PngCompression,
    /// Whether to validate decoded image dimensions before encoding
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<u32>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 75,
            png_compression: PngCompression::Default,
            validate_dimensions: true,
            max_dimension: Some(20_000),
        }
    }
}

impl ConverterConfig {
    pub fn builder() -> ConverterConfigBuilder {
        ConverterConfigBuilder::default()
    }
}

/// Builder for ConverterConfig
#[derive(Default)]
pub struct ConverterConfigBuilder {
    jpeg_quality: Option<u8>,
    png_compression: Option<PngCompression>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
}

impl ConverterConfigBuilder {
    /// Clamped to 1-100.
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality.clamp(1, 100));
        self
    }

    pub fn png_compression(mut self, compression: PngCompression) -> Self {
        self.png_compression = Some(compression);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ConverterConfig {
        let default = ConverterConfig::default();
        ConverterConfig {
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            png_compression: self.png_compression.unwrap_or(default.png_compression),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
