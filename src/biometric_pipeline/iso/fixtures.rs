//! Byte-level builders for ISO 19794 2011 records used across the test
//! suites.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};

const CAPTURE_DATE: [u8; 9] = [0x07, 0xE8, 5, 17, 10, 30, 0, 0, 0];
const DEVICE_IDS: [u8; 5] = [0x00, 0x00, 0x0F, 0x00, 0x01];
const QUALITY_BLOCK: [u8; 5] = [80, 0x00, 0x0F, 0x00, 0x01];

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_image(out: &mut Vec<u8>, image: &[u8]) {
    push_u32(out, image.len() as u32);
    out.extend_from_slice(image);
}

/// Prefixes a representation body with its own length.
fn representation(body: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 4);
    push_u32(&mut out, body.len() as u32 + 4);
    out.extend(body);
    out
}

fn record(format_id: &[u8; 4], version: &[u8; 4], tail: &[u8], representation: Vec<u8>) -> Vec<u8> {
    let header_len = 4 + 4 + 4 + 2 + tail.len();
    let mut out = Vec::new();
    out.extend_from_slice(format_id);
    out.extend_from_slice(version);
    push_u32(&mut out, (header_len + representation.len()) as u32);
    push_u16(&mut out, 1);
    out.extend_from_slice(tail);
    out.extend(representation);
    out
}

/// Finger record with one representation. Certification blocks are written
/// when `certified` is set.
pub(crate) fn finger_record_with(compression: u8, image: &[u8], certified: bool) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&CAPTURE_DATE);
    body.extend_from_slice(&DEVICE_IDS);
    body.push(1);
    body.extend_from_slice(&QUALITY_BLOCK);
    if certified {
        body.extend_from_slice(&[2, 0x00, 0x01, 0x00, 0x00, 0x02, 0x01]);
    }
    body.extend_from_slice(&[1, 0, 1]);
    for rate in [500u16, 500, 500, 500] {
        push_u16(&mut body, rate);
    }
    body.extend_from_slice(&[8, compression, 0]);
    push_u16(&mut body, 8);
    push_u16(&mut body, 8);
    push_image(&mut body, image);

    record(b"FIR\0", b"020\0", &[u8::from(certified), 1], representation(body))
}

pub(crate) fn finger_record(compression: u8, image: &[u8]) -> Vec<u8> {
    finger_record_with(compression, image, false)
}

pub(crate) fn face_record(data_type: u8, image: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&CAPTURE_DATE);
    body.extend_from_slice(&DEVICE_IDS);
    body.push(0);
    push_u16(&mut body, 2);
    body.extend_from_slice(&[1, 2, 3, 170]);
    body.extend_from_slice(&[0, 0, 1]);
    push_u16(&mut body, 1);
    body.extend_from_slice(&[0, 0, 0]);
    body.extend_from_slice(&[0, 0, 0]);
    for landmark in 0..2u8 {
        body.extend_from_slice(&[1, 0x31 + landmark, 0, 10, 0, 20, 0, 0]);
    }
    body.extend_from_slice(&[1, data_type]);
    push_u16(&mut body, 8);
    push_u16(&mut body, 8);
    body.push(0);
    push_u16(&mut body, 0);
    body.extend_from_slice(&[0, 1]);
    push_image(&mut body, image);

    record(b"FAC\0", b"030\0", &[0, 0, 0], representation(body))
}

pub(crate) fn iris_record(format: u8, image: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&CAPTURE_DATE);
    body.extend_from_slice(&DEVICE_IDS);
    body.push(1);
    body.extend_from_slice(&QUALITY_BLOCK);
    push_u16(&mut body, 1);
    body.extend_from_slice(&[1, 2, format, 0]);
    push_u16(&mut body, 8);
    push_u16(&mut body, 8);
    body.push(8);
    push_u16(&mut body, 0);
    push_u16(&mut body, 0xFFFF);
    push_u16(&mut body, 0xFFFF);
    for bound in [2u16, 6, 2, 6, 4, 8] {
        push_u16(&mut body, bound);
    }
    push_image(&mut body, image);

    record(b"IIR\0", b"020\0", &[0, 1], representation(body))
}

/// Small grayscale PNG with a horizontal gradient.
pub(crate) fn gray_png(width: u32, height: u32) -> Vec<u8> {
    let image = GrayImage::from_fn(width, height, |x, y| Luma([((x * 16 + y) % 256) as u8]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("in-memory PNG encode");
    out.into_inner()
}
