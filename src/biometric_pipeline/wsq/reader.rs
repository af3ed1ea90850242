use crate::biometric_pipeline::wsq::WsqError;

pub const SOI: u16 = 0xFFA0;
pub const EOI: u16 = 0xFFA1;
pub const SOF: u16 = 0xFFA2;
pub const SOB: u16 = 0xFFA3;
pub const DTT: u16 = 0xFFA4;
pub const DQT: u16 = 0xFFA5;
pub const DHT: u16 = 0xFFA6;
pub const DRT: u16 = 0xFFA7;
pub const COM: u16 = 0xFFA8;

const TABLE_MARKERS: [u16; 5] = [DTT, DQT, DHT, DRT, COM];

/// Which markers may legally appear at a given point of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    StartOfImage,
    TablesOrFrame,
    TablesOrBlock,
}

impl Expect {
    fn accepts(self, marker: u16) -> bool {
        match self {
            Expect::StartOfImage => marker == SOI,
            Expect::TablesOrFrame => marker == SOF || TABLE_MARKERS.contains(&marker),
            Expect::TablesOrBlock => {
                marker == SOB || marker == EOI || TABLE_MARKERS.contains(&marker)
            }
        }
    }
}

pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], WsqError> {
        if self.data.len() - self.pos < len {
            return Err(WsqError::Truncated { offset: self.pos });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), WsqError> {
        self.take(len).map(|_| ())
    }

    pub fn u8(&mut self) -> Result<u8, WsqError> {
        Ok(self.take(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16, WsqError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn u32(&mut self) -> Result<u32, WsqError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Scaled decimal: one byte power-of-ten divisor followed by a u16.
    pub fn scaled_u16(&mut self) -> Result<f32, WsqError> {
        let scale = self.u8()?;
        let value = self.u16()?;
        Ok(descale(value as f32, scale))
    }

    pub fn marker(&mut self, expect: Expect) -> Result<u16, WsqError> {
        let offset = self.pos;
        let marker = self.u16()?;
        if !expect.accepts(marker) {
            return Err(WsqError::UnexpectedMarker { marker, offset });
        }
        Ok(marker)
    }
}

pub fn descale(mut value: f32, scale: u8) -> f32 {
    for _ in 0..scale {
        value /= 10.0;
    }
    value
}
