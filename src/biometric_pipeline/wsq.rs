//! WSQ fingerprint image decoding module
//!
//! Decodes FBI Wavelet Scalar Quantization codestreams into 8-bit grayscale
//! rasters: header tables, Huffman-coded subband coefficients, dequantization
//! and the inverse 9/7 wavelet transform.

mod huffman;
mod reader;
mod reconstruct;
mod tables;
mod tree;

#[cfg(test)]
pub(crate) mod fixtures;

use image::GrayImage;
use thiserror::Error;
use tracing::debug;

use reader::{ByteReader, Expect, SOF};
use tables::{FrameHeader, Tables};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WsqError {
    #[error("WSQ stream truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("unexpected WSQ marker {marker:#06X} at offset {offset}")]
    UnexpectedMarker { marker: u16, offset: usize },

    #[error("missing stuffed zero after 0xFF at offset {offset}")]
    MissingStuffedZero { offset: usize },

    #[error("unsupported filter lengths: highpass {highpass}, lowpass {lowpass}")]
    UnsupportedFilter { highpass: u8, lowpass: u8 },

    #[error("invalid Huffman table {table_id}: {reason}")]
    InvalidHuffmanTable { table_id: u8, reason: &'static str },

    #[error("Huffman table {0} used before being defined")]
    UndefinedHuffmanTable(u8),

    #[error("invalid Huffman code at offset {offset}")]
    InvalidHuffmanCode { offset: usize },

    #[error("invalid coefficient symbol {0}")]
    InvalidSymbol(u8),

    #[error("more coefficients than the {expected} pixels of the frame")]
    CoefficientOverflow { expected: usize },

    #[error("missing {0} table")]
    MissingTable(&'static str),

    #[error("frame has zero width or height")]
    EmptyFrame,

    #[error("frame {width}x{height} exceeds maximum dimension {max}")]
    FrameTooLarge { width: u16, height: u16, max: u32 },

    #[error("cannot allocate {elements} samples for the frame")]
    OutOfMemory { elements: usize },
}

/// Zero-filled buffer that reports allocation failure instead of aborting.
fn zeroed<T: Clone + Default>(len: usize) -> Result<Vec<T>, WsqError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| WsqError::OutOfMemory { elements: len })?;
    buffer.resize(len, T::default());
    Ok(buffer)
}

/// Decodes a complete WSQ file.
pub fn decode(data: &[u8]) -> Result<GrayImage, WsqError> {
    decode_with_limit(data, None)
}

/// Decodes a complete WSQ file, rejecting frames wider or taller than
/// `max_dimension` before any sample buffer is allocated.
pub fn decode_with_limit(data: &[u8], max_dimension: Option<u32>) -> Result<GrayImage, WsqError> {
    let mut reader = ByteReader::new(data);
    reader.marker(Expect::StartOfImage)?;

    let mut tables = Tables::default();
    let mut marker = reader.marker(Expect::TablesOrFrame)?;
    while marker != SOF {
        tables.read(marker, &mut reader)?;
        marker = reader.marker(Expect::TablesOrFrame)?;
    }

    let frame = FrameHeader::read(&mut reader)?;
    let (width, height) = (frame.width as usize, frame.height as usize);
    if width == 0 || height == 0 {
        return Err(WsqError::EmptyFrame);
    }
    if let Some(max) = max_dimension {
        if u32::from(frame.width) > max || u32::from(frame.height) > max {
            return Err(WsqError::FrameTooLarge {
                width: frame.width,
                height: frame.height,
                max,
            });
        }
    }
    debug!(
        width,
        height,
        m_shift = frame.m_shift,
        r_scale = frame.r_scale,
        "WSQ frame header"
    );

    let nodes = tree::wavelet_tree(width, height);
    let bands = tree::subband_tree(&nodes);

    let coefficients = huffman::decode_coefficients(&mut reader, &mut tables, width * height)?;

    let quantization = tables
        .quantization
        .as_ref()
        .ok_or(WsqError::MissingTable("quantization"))?;
    let transform = tables
        .transform
        .as_ref()
        .ok_or(WsqError::MissingTable("transform"))?;

    let mut pixels = reconstruct::unquantize(&coefficients, quantization, &bands, width, height)?;
    reconstruct::reconstruct(&mut pixels, width, &nodes, transform);
    let gray = reconstruct::to_gray(&pixels, frame.m_shift, frame.r_scale)?;

    GrayImage::from_raw(frame.width.into(), frame.height.into(), gray).ok_or(WsqError::EmptyFrame)
}
