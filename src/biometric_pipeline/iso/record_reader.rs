//! Big-endian cursor over an ISO 19794 record plus the blocks every
//! 2011-edition modality shares: the general header, capture date/time,
//! device identifiers, and quality/certification blocks.

use crate::biometric_pipeline::iso::error::DecodeError;

type Result<T> = std::result::Result<T, DecodeError>;

const QUALITY_BLOCK_LEN: usize = 5;
const CERTIFICATION_BLOCK_LEN: usize = 3;

pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads the image data length followed by the image data.
    pub fn length_prefixed(&mut self, field: &'static str) -> Result<&'a [u8]> {
        let declared = self.u32()? as usize;
        if declared > self.remaining() {
            return Err(DecodeError::LengthMismatch {
                field,
                declared,
                available: self.remaining(),
            });
        }
        self.take(declared)
    }
}

/// Fields common to the finger, face and iris general headers. The trailing
/// modality-specific bytes are left for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralHeader {
    pub record_length: u32,
    pub representation_count: u16,
    pub certification_flag: bool,
}

impl GeneralHeader {
    pub fn read(
        reader: &mut RecordReader<'_>,
        format_id: &'static str,
        version: &'static str,
    ) -> Result<Self> {
        let found = reader.take(4)?;
        if found != format_id.as_bytes() {
            return Err(DecodeError::BadFormatIdentifier {
                expected: format_id,
                found: String::from_utf8_lossy(found).into_owned(),
            });
        }
        let found = reader.take(4)?;
        if found != version.as_bytes() {
            return Err(DecodeError::UnsupportedVersion {
                expected: version,
                found: String::from_utf8_lossy(found).into_owned(),
            });
        }

        let record_length = reader.u32()?;
        let total = reader.data.len();
        if record_length as usize > total {
            return Err(DecodeError::LengthMismatch {
                field: "record",
                declared: record_length as usize,
                available: total,
            });
        }

        let representation_count = reader.u16()?;
        let certification_flag = reader.u8()? != 0;
        if representation_count == 0 {
            return Err(DecodeError::NoRepresentation);
        }

        Ok(Self {
            record_length,
            representation_count,
            certification_flag,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityBlock {
    pub score: u8,
    pub algorithm_vendor: u16,
    pub algorithm_id: u16,
}

/// Leading part of every representation, up to and including the quality
/// blocks (and certification blocks where the modality carries them).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepresentationHeader {
    pub length: u32,
    pub captured_at: CaptureDateTime,
    pub device_technology: u8,
    pub device_vendor: u16,
    pub device_type: u16,
    pub quality_blocks: Vec<QualityBlock>,
    pub certification_blocks: usize,
}

impl RepresentationHeader {
    pub fn read(reader: &mut RecordReader<'_>, with_certifications: bool) -> Result<Self> {
        let start = reader.position();
        let length = reader.u32()?;
        let available = reader.data.len() - start;
        if length as usize > available {
            return Err(DecodeError::LengthMismatch {
                field: "representation",
                declared: length as usize,
                available,
            });
        }

        let captured_at = CaptureDateTime {
            year: reader.u16()?,
            month: reader.u8()?,
            day: reader.u8()?,
            hour: reader.u8()?,
            minute: reader.u8()?,
            second: reader.u8()?,
            millisecond: reader.u16()?,
        };
        let device_technology = reader.u8()?;
        let device_vendor = reader.u16()?;
        let device_type = reader.u16()?;

        let quality_count = reader.u8()? as usize;
        let mut quality_blocks = Vec::with_capacity(quality_count);
        for _ in 0..quality_count {
            let block = reader.take(QUALITY_BLOCK_LEN)?;
            quality_blocks.push(QualityBlock {
                score: block[0],
                algorithm_vendor: u16::from_be_bytes([block[1], block[2]]),
                algorithm_id: u16::from_be_bytes([block[3], block[4]]),
            });
        }

        let certification_blocks = if with_certifications {
            let count = reader.u8()? as usize;
            reader.skip(count * CERTIFICATION_BLOCK_LEN)?;
            count
        } else {
            0
        };

        Ok(Self {
            length,
            captured_at,
            device_technology,
            device_vendor,
            device_type,
            quality_blocks,
            certification_blocks,
        })
    }
}
