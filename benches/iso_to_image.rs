use std::collections::BTreeMap;
use std::io::Cursor;

use bio_converter_rs::biometric_pipeline::common::base64url;
use bio_converter_rs::biometric_pipeline::{ConverterConfig, IsoToImagePipeline, PngCompression};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{GrayImage, ImageFormat, Luma};

const FINGER: &str = "ISO19794_4_2011";

fn generate_png(width: u32, height: u32) -> Vec<u8> {
    let image = GrayImage::from_fn(width, height, |x, y| Luma([((x + y) % 256) as u8]));
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Finger record (ISO 19794-4:2011) with one representation whose image is
/// flagged as lossy JPEG2000.
fn generate_finger_record(image: &[u8]) -> String {
    let mut body = Vec::new();
    body.extend_from_slice(&[0x07, 0xE8, 5, 17, 10, 30, 0, 0, 0]);
    body.extend_from_slice(&[0x00, 0x00, 0x0F, 0x00, 0x01]);
    body.push(0);
    body.extend_from_slice(&[1, 0, 1]);
    for _ in 0..4 {
        body.extend_from_slice(&500u16.to_be_bytes());
    }
    body.extend_from_slice(&[8, 4, 0]);
    body.extend_from_slice(&8u16.to_be_bytes());
    body.extend_from_slice(&8u16.to_be_bytes());
    body.extend_from_slice(&(image.len() as u32).to_be_bytes());
    body.extend_from_slice(image);

    let representation_len = body.len() as u32 + 4;
    let mut record = b"FIR\0020\0".to_vec();
    record.extend_from_slice(&(16 + representation_len).to_be_bytes());
    record.extend_from_slice(&1u16.to_be_bytes());
    record.extend_from_slice(&[0, 1]);
    record.extend_from_slice(&representation_len.to_be_bytes());
    record.extend(body);
    base64url::encode(&record)
}

fn request(size: u32) -> BTreeMap<String, String> {
    BTreeMap::from([("finger".to_string(), generate_finger_record(&generate_png(size, size)))])
}

fn benchmark_conversion_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion_by_size");
    let pipeline = IsoToImagePipeline::new(ConverterConfig::default());

    for size in [100u32, 500, 1000] {
        let values = request(size);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{size}x{size}")), &values, |b, values| {
            b.iter(|| {
                let _ = pipeline.convert(black_box(Some(values)), Some(FINGER), Some("IMAGE/JPEG"), None, None);
            });
        });
    }

    group.finish();
}

fn benchmark_png_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_compression");
    let values = request(500);

    for (compression, label) in [
        (PngCompression::Fast, "fast"),
        (PngCompression::Default, "default"),
        (PngCompression::Best, "best"),
    ] {
        let config = ConverterConfig::builder().png_compression(compression).build();
        let pipeline = IsoToImagePipeline::new(config);
        group.bench_function(label, |b| {
            b.iter(|| {
                let _ = pipeline.convert(black_box(Some(&values)), Some(FINGER), Some("IMAGE/PNG"), None, None);
            });
        });
    }

    group.finish();
}

fn benchmark_jpeg_quality(c: &mut Criterion) {
    let mut group = c.benchmark_group("jpeg_quality");
    let values = request(500);

    for quality in [50u8, 75, 95] {
        let config = ConverterConfig::builder().jpeg_quality(quality).build();
        let pipeline = IsoToImagePipeline::new(config);
        group.bench_with_input(BenchmarkId::from_parameter(quality), &values, |b, values| {
            b.iter(|| {
                let _ = pipeline.convert(black_box(Some(values)), Some(FINGER), Some("IMAGE/JPEG"), None, None);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_conversion_sizes,
    benchmark_png_compression,
    benchmark_jpeg_quality
);
criterion_main!(benches);
