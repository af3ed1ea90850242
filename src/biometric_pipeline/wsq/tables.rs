//! WSQ header segments: transform, quantization and Huffman tables plus the
//! frame and block headers.

use crate::biometric_pipeline::wsq::reader::{descale, ByteReader, COM, DHT, DQT, DRT, DTT};
use crate::biometric_pipeline::wsq::WsqError;

pub const MAX_SUBBANDS: usize = 64;
pub const MAX_HUFFMAN_TABLES: usize = 8;
const MAX_HUFFMAN_VALUES: usize = 256;
const MAX_FILTER_LEN: u8 = 32;

/// Synthesis filters rebuilt from the analysis filter halves stored in the
/// stream.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformTable {
    pub lowpass: Vec<f32>,
    pub highpass: Vec<f32>,
}

impl TransformTable {
    /// `first` and `second` are the centre-and-right halves in stream order.
    /// The first half becomes the synthesis highpass filter, the second the
    /// synthesis lowpass filter, each modulated by `(-1)^n`.
    pub fn from_halves(first: &[f32], second: &[f32]) -> Self {
        Self {
            highpass: mirror_modulated(first),
            lowpass: mirror_modulated(second),
        }
    }

    fn read(reader: &mut ByteReader<'_>) -> Result<Self, WsqError> {
        let _len = reader.u16()?;
        let hisz = reader.u8()?;
        let losz = reader.u8()?;
        // Only odd-length (symmetric) filter banks.
        if hisz % 2 == 0 || losz % 2 == 0 || hisz > MAX_FILTER_LEN || losz > MAX_FILTER_LEN {
            return Err(WsqError::UnsupportedFilter {
                highpass: hisz,
                lowpass: losz,
            });
        }

        let first = read_filter_half(reader, (hisz as usize + 1) / 2)?;
        let second = read_filter_half(reader, (losz as usize + 1) / 2)?;
        Ok(Self::from_halves(&first, &second))
    }
}

fn read_filter_half(reader: &mut ByteReader<'_>, len: usize) -> Result<Vec<f32>, WsqError> {
    (0..len)
        .map(|_| {
            let sign = reader.u8()?;
            let scale = reader.u8()?;
            let value = descale(reader.u32()? as f32, scale);
            Ok(if sign != 0 { -value } else { value })
        })
        .collect()
}

fn mirror_modulated(half: &[f32]) -> Vec<f32> {
    if half.is_empty() {
        return Vec::new();
    }
    let centre = half.len() - 1;
    let mut filter = vec![0.0f32; half.len() * 2 - 1];
    for (n, &value) in half.iter().enumerate() {
        let tap = if n % 2 == 0 { value } else { -value };
        filter[centre + n] = tap;
        filter[centre - n] = tap;
    }
    filter
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantizationTable {
    pub bin_center: f32,
    pub q_bin: [f32; MAX_SUBBANDS],
    pub z_bin: [f32; MAX_SUBBANDS],
}

impl QuantizationTable {
    fn read(reader: &mut ByteReader<'_>) -> Result<Self, WsqError> {
        let _len = reader.u16()?;
        let bin_center = reader.scaled_u16()?;
        let mut q_bin = [0.0f32; MAX_SUBBANDS];
        let mut z_bin = [0.0f32; MAX_SUBBANDS];
        for band in 0..MAX_SUBBANDS {
            q_bin[band] = reader.scaled_u16()?;
            z_bin[band] = reader.scaled_u16()?;
        }
        Ok(Self {
            bin_center,
            q_bin,
            z_bin,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTable {
    /// Number of codes of each length 1..=16.
    pub bits: [u8; 16],
    pub values: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameHeader {
    pub black: u8,
    pub white: u8,
    pub height: u16,
    pub width: u16,
    pub m_shift: f32,
    pub r_scale: f32,
    pub encoder: u8,
    pub software: u16,
}

impl FrameHeader {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, WsqError> {
        let _len = reader.u16()?;
        Ok(Self {
            black: reader.u8()?,
            white: reader.u8()?,
            height: reader.u16()?,
            width: reader.u16()?,
            m_shift: reader.scaled_u16()?,
            r_scale: reader.scaled_u16()?,
            encoder: reader.u8()?,
            software: reader.u16()?,
        })
    }
}

/// Reads a block header and returns the Huffman table id it selects.
pub fn read_block_header(reader: &mut ByteReader<'_>) -> Result<u8, WsqError> {
    let _len = reader.u16()?;
    reader.u8()
}

/// Tables defined so far. Later definitions replace earlier ones.
#[derive(Debug, Default)]
pub struct Tables {
    pub transform: Option<TransformTable>,
    pub quantization: Option<QuantizationTable>,
    pub huffman: [Option<HuffmanTable>; MAX_HUFFMAN_TABLES],
    pub restart_interval: Option<u16>,
}

impl Tables {
    pub fn read(&mut self, marker: u16, reader: &mut ByteReader<'_>) -> Result<(), WsqError> {
        match marker {
            DTT => self.transform = Some(TransformTable::read(reader)?),
            DQT => self.quantization = Some(QuantizationTable::read(reader)?),
            DHT => self.read_huffman(reader)?,
            DRT => {
                let _len = reader.u16()?;
                self.restart_interval = Some(reader.u16()?);
            }
            COM => {
                let len = reader.u16()? as usize;
                reader.skip(len.saturating_sub(2))?;
            }
            other => {
                return Err(WsqError::UnexpectedMarker {
                    marker: other,
                    offset: reader.position().saturating_sub(2),
                })
            }
        }
        Ok(())
    }

    /// One DHT segment may carry several tables back to back.
    fn read_huffman(&mut self, reader: &mut ByteReader<'_>) -> Result<(), WsqError> {
        let mut remaining = (reader.u16()? as usize).saturating_sub(2);
        while remaining > 0 {
            let table_id = reader.u8()?;
            if table_id as usize >= MAX_HUFFMAN_TABLES {
                return Err(WsqError::InvalidHuffmanTable {
                    table_id,
                    reason: "table id out of range",
                });
            }

            let mut bits = [0u8; 16];
            for count in bits.iter_mut() {
                *count = reader.u8()?;
            }
            let value_count: usize = bits.iter().map(|&b| b as usize).sum();
            if value_count > MAX_HUFFMAN_VALUES {
                return Err(WsqError::InvalidHuffmanTable {
                    table_id,
                    reason: "more than 256 code values",
                });
            }

            let values = (0..value_count)
                .map(|_| reader.u8())
                .collect::<Result<Vec<_>, _>>()?;
            self.huffman[table_id as usize] = Some(HuffmanTable { bits, values });

            remaining = remaining.saturating_sub(1 + 16 + value_count);
        }
        Ok(())
    }
}
