//! Decoded ISO 19794 representation types

/// Compression algorithm of a finger image (ISO 19794-4:2011).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerCompression {
    Uncompressed,
    BitPacked,
    Wsq,
    Jpeg,
    Jpeg2000Lossy,
    Jpeg2000Lossless,
    Png,
    Reserved(u8),
}

impl FingerCompression {
    pub fn from_byte(value: u8) -> Self {
        match value {
            0 => FingerCompression::Uncompressed,
            1 => FingerCompression::BitPacked,
            2 => FingerCompression::Wsq,
            3 => FingerCompression::Jpeg,
            4 => FingerCompression::Jpeg2000Lossy,
            5 => FingerCompression::Jpeg2000Lossless,
            6 => FingerCompression::Png,
            other => FingerCompression::Reserved(other),
        }
    }
}

/// Image data type of a face image (ISO 19794-5:2011).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceImageDataType {
    Jpeg,
    Jpeg2000Lossy,
    Jpeg2000Lossless,
    Png,
    Reserved(u8),
}

impl FaceImageDataType {
    pub fn from_byte(value: u8) -> Self {
        match value {
            0 => FaceImageDataType::Jpeg,
            1 => FaceImageDataType::Jpeg2000Lossy,
            2 => FaceImageDataType::Jpeg2000Lossless,
            3 => FaceImageDataType::Png,
            other => FaceImageDataType::Reserved(other),
        }
    }
}

/// Image format of an iris image (ISO 19794-6:2011).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrisImageFormat {
    MonoRaw,
    RgbRaw,
    MonoJpeg,
    RgbJpeg,
    MonoJpegLs,
    RgbJpegLs,
    MonoJpeg2000,
    RgbJpeg2000,
    MonoPng,
    RgbPng,
    Reserved(u8),
}

impl IrisImageFormat {
    pub fn from_byte(value: u8) -> Self {
        match value {
            0x02 => IrisImageFormat::MonoRaw,
            0x04 => IrisImageFormat::RgbRaw,
            0x06 => IrisImageFormat::MonoJpeg,
            0x08 => IrisImageFormat::RgbJpeg,
            0x0A => IrisImageFormat::MonoJpegLs,
            0x0C => IrisImageFormat::RgbJpegLs,
            0x0E => IrisImageFormat::MonoJpeg2000,
            0x10 => IrisImageFormat::RgbJpeg2000,
            0x20 => IrisImageFormat::MonoPng,
            0x22 => IrisImageFormat::RgbPng,
            other => IrisImageFormat::Reserved(other),
        }
    }
}

/// How the embedded image of a representation is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InnerEncoding {
    Finger(FingerCompression),
    Face(FaceImageDataType),
    Iris(IrisImageFormat),
}

/// Embedded image pulled out of the first representation of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBiometric {
    pub inner_encoding: InnerEncoding,
    pub image_bytes: Vec<u8>,
}
