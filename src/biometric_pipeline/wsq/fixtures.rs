//! Hand-assembled WSQ codestreams for tests.

use crate::biometric_pipeline::wsq::reader::{DHT, DQT, DTT, EOI, SOB, SOF, SOI};

/// Analysis filters of the FBI 9/7 filter bank.
pub(crate) const ANALYSIS_LOWPASS: [f64; 9] = [
    0.037_828_455_507_264_04,
    -0.023_849_465_019_556_85,
    -0.110_624_404_409_282_6,
    0.377_402_855_612_653_8,
    0.852_698_679_008_893_8,
    0.377_402_855_612_653_8,
    -0.110_624_404_409_282_6,
    -0.023_849_465_019_556_85,
    0.037_828_455_507_264_04,
];

pub(crate) const ANALYSIS_HIGHPASS: [f64; 7] = [
    0.064_538_882_628_697_06,
    -0.040_689_417_609_164_06,
    -0.418_092_273_221_617_24,
    0.788_485_616_405_582_9,
    -0.418_092_273_221_617_24,
    -0.040_689_417_609_164_06,
    0.064_538_882_628_697_06,
];

fn segment(marker: u16, body: &[u8]) -> Vec<u8> {
    let mut out = marker.to_be_bytes().to_vec();
    out.extend_from_slice(&((body.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(body);
    out
}

fn push_filter_half(body: &mut Vec<u8>, half: &[f64]) {
    for &tap in half {
        body.push(u8::from(tap < 0.0));
        body.push(9);
        body.extend_from_slice(&((tap.abs() * 1e9).round() as u32).to_be_bytes());
    }
}

pub(crate) fn transform_table() -> Vec<u8> {
    let mut body = vec![9, 7];
    push_filter_half(&mut body, &ANALYSIS_LOWPASS[4..]);
    push_filter_half(&mut body, &ANALYSIS_HIGHPASS[3..]);
    segment(DTT, &body)
}

/// Bin centre 0.44; only subband 0 is coded, with step `q0` and no zero bin.
pub(crate) fn quantization_table(q0: u16) -> Vec<u8> {
    let mut body = vec![2, 0x00, 44];
    for band in 0..64 {
        let q = if band == 0 { q0 } else { 0 };
        body.push(0);
        body.extend_from_slice(&q.to_be_bytes());
        body.extend_from_slice(&[0, 0, 0]);
    }
    segment(DQT, &body)
}

pub(crate) fn frame_header(width: u16, height: u16, m_shift: u16, r_scale: u16) -> Vec<u8> {
    let mut body = vec![0, 255];
    body.extend_from_slice(&height.to_be_bytes());
    body.extend_from_slice(&width.to_be_bytes());
    body.push(0);
    body.extend_from_slice(&m_shift.to_be_bytes());
    body.push(0);
    body.extend_from_slice(&r_scale.to_be_bytes());
    body.push(2);
    body.extend_from_slice(&0u16.to_be_bytes());
    segment(SOF, &body)
}

/// Huffman table 0 with the single one-bit code `0` for symbol 181 (+1).
pub(crate) fn unit_huffman_table() -> Vec<u8> {
    let mut body = vec![0, 1];
    body.extend_from_slice(&[0; 15]);
    body.push(181);
    segment(DHT, &body)
}

/// A stream with no coded coefficients; every pixel decodes to `m_shift`.
pub(crate) fn flat_image(width: u16, height: u16, m_shift: u16) -> Vec<u8> {
    let mut out = SOI.to_be_bytes().to_vec();
    out.extend(transform_table());
    out.extend(quantization_table(0));
    out.extend(frame_header(width, height, m_shift, 100));
    out.extend(EOI.to_be_bytes());
    out
}

/// 64x64 stream whose lowest subband holds four `+1` coefficients.
pub(crate) fn single_band_image() -> Vec<u8> {
    let mut out = SOI.to_be_bytes().to_vec();
    out.extend(transform_table());
    out.extend(quantization_table(1));
    out.extend(frame_header(64, 64, 128, 100));
    out.extend(unit_huffman_table());
    out.extend(segment(SOB, &[0]));
    out.push(0x0F);
    out.extend(EOI.to_be_bytes());
    out
}
