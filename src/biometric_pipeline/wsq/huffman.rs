//! Entropy-coded segment: byte-stuffed bitstream, canonical Huffman decode
//! and the zero-run/escape symbol alphabet.

use crate::biometric_pipeline::wsq::reader::{ByteReader, Expect, EOI, SOB};
use crate::biometric_pipeline::wsq::tables::{read_block_header, HuffmanTable, Tables};
use crate::biometric_pipeline::wsq::{zeroed, WsqError};

const MAX_CODE_LEN: usize = 16;
const COEFFICIENT_BIAS: i32 = 180;

/// Per-length lookup derived from a canonical code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeTable {
    maxcode: [i32; MAX_CODE_LEN + 1],
    mincode: [i32; MAX_CODE_LEN + 1],
    valptr: [usize; MAX_CODE_LEN + 1],
    values: Vec<u8>,
}

impl DecodeTable {
    pub fn new(table: &HuffmanTable) -> Self {
        let mut maxcode = [0i32; MAX_CODE_LEN + 1];
        let mut mincode = [0i32; MAX_CODE_LEN + 1];
        let mut valptr = [0usize; MAX_CODE_LEN + 1];

        let mut code = 0i32;
        let mut next_value = 0usize;
        for len in 1..=MAX_CODE_LEN {
            let count = table.bits[len - 1] as i32;
            if count == 0 {
                maxcode[len] = -1;
            } else {
                valptr[len] = next_value;
                mincode[len] = code;
                maxcode[len] = code + count - 1;
            }
            code = (code + count) << 1;
            next_value += count as usize;
        }

        Self {
            maxcode,
            mincode,
            valptr,
            values: table.values.clone(),
        }
    }
}

enum Bits {
    Value(u32),
    Marker(u16),
}

enum Symbol {
    Value(u8),
    Marker(u16),
}

/// Bit position within the current entropy-coded byte.
#[derive(Debug, Default)]
struct BitCursor {
    byte: u8,
    bit_count: u8,
}

impl BitCursor {
    /// Markers are only recognised on single-bit reads; a marker inside a
    /// multi-bit field is an error.
    fn read(&mut self, reader: &mut ByteReader<'_>, count: u8) -> Result<Bits, WsqError> {
        let mut bits = 0u32;
        let mut needed = count;
        while needed > 0 {
            if self.bit_count == 0 {
                let offset = reader.position();
                self.byte = reader.u8()?;
                self.bit_count = 8;
                if self.byte == 0xFF {
                    let next = reader.u8()?;
                    if next != 0x00 {
                        if count == 1 {
                            return Ok(Bits::Marker(u16::from_be_bytes([0xFF, next])));
                        }
                        return Err(WsqError::MissingStuffedZero { offset });
                    }
                }
            }

            let take = needed.min(self.bit_count);
            let shift = self.bit_count - take;
            let chunk = (u32::from(self.byte) >> shift) & ((1u32 << take) - 1);
            bits = (bits << take) | chunk;
            self.bit_count -= take;
            needed -= take;
        }
        Ok(Bits::Value(bits))
    }

    fn read_value(&mut self, reader: &mut ByteReader<'_>, count: u8) -> Result<u32, WsqError> {
        match self.read(reader, count)? {
            Bits::Value(value) => Ok(value),
            Bits::Marker(_) => Err(WsqError::MissingStuffedZero {
                offset: reader.position().saturating_sub(2),
            }),
        }
    }

    fn symbol(&mut self, reader: &mut ByteReader<'_>, table: &DecodeTable) -> Result<Symbol, WsqError> {
        let mut code = match self.read(reader, 1)? {
            Bits::Value(bit) => bit as i32,
            Bits::Marker(marker) => return Ok(Symbol::Marker(marker)),
        };

        let mut len = 1;
        while code > table.maxcode[len] {
            len += 1;
            if len > MAX_CODE_LEN {
                return Err(WsqError::InvalidHuffmanCode {
                    offset: reader.position(),
                });
            }
            match self.read(reader, 1)? {
                Bits::Value(bit) => code = (code << 1) | bit as i32,
                Bits::Marker(marker) => return Ok(Symbol::Marker(marker)),
            }
        }

        let index = table.valptr[len] as i64 + i64::from(code - table.mincode[len]);
        usize::try_from(index)
            .ok()
            .and_then(|index| table.values.get(index))
            .map(|&value| Symbol::Value(value))
            .ok_or(WsqError::InvalidHuffmanCode {
                offset: reader.position(),
            })
    }
}

/// Decodes every entropy-coded block up to EOI into quantized coefficients,
/// in subband order. Table segments between blocks update `tables`.
pub fn decode_coefficients(
    reader: &mut ByteReader<'_>,
    tables: &mut Tables,
    pixel_count: usize,
) -> Result<Vec<i32>, WsqError> {
    let mut coefficients = zeroed::<i32>(pixel_count)?;
    let mut next = 0usize;
    let mut cursor = BitCursor::default();
    let mut active: Option<DecodeTable> = None;
    let mut pending = Some(reader.marker(Expect::TablesOrBlock)?);

    'blocks: loop {
        if let Some(mut marker) = pending.take() {
            loop {
                match marker {
                    EOI => break 'blocks,
                    SOB => break,
                    table => {
                        tables.read(table, reader)?;
                        marker = reader.marker(Expect::TablesOrBlock)?;
                    }
                }
            }

            let table_id = read_block_header(reader)?;
            let table = tables
                .huffman
                .get(table_id as usize)
                .and_then(Option::as_ref)
                .ok_or(WsqError::UndefinedHuffmanTable(table_id))?;
            active = Some(DecodeTable::new(table));
            cursor = BitCursor::default();
        }

        let Some(table) = active.as_ref() else {
            return Err(WsqError::MissingTable("huffman"));
        };

        let symbol = match cursor.symbol(reader, table)? {
            Symbol::Marker(marker) => {
                pending = Some(marker);
                continue;
            }
            Symbol::Value(symbol) => symbol,
        };

        let (run, value) = match symbol {
            1..=100 => (symbol as usize, None),
            101 => (0, Some(cursor.read_value(reader, 8)? as i32)),
            102 => (0, Some(-(cursor.read_value(reader, 8)? as i32))),
            103 => (0, Some(cursor.read_value(reader, 16)? as i32)),
            104 => (0, Some(-(cursor.read_value(reader, 16)? as i32))),
            105 => (cursor.read_value(reader, 8)? as usize, None),
            106 => (cursor.read_value(reader, 16)? as usize, None),
            107..=254 => (0, Some(symbol as i32 - COEFFICIENT_BIAS)),
            other => return Err(WsqError::InvalidSymbol(other)),
        };

        // Zero runs only advance; the buffer starts zeroed.
        next += run;
        if let Some(value) = value {
            let slot = coefficients
                .get_mut(next)
                .ok_or(WsqError::CoefficientOverflow { expected: pixel_count })?;
            *slot = value;
            next += 1;
        }
        if next > pixel_count {
            return Err(WsqError::CoefficientOverflow { expected: pixel_count });
        }
    }

    Ok(coefficients)
}
