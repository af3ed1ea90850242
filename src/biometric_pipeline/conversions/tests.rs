#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use image::{DynamicImage, GrayImage, Luma};

    use crate::biometric_pipeline::common::base64url;
    use crate::biometric_pipeline::common::error::{ConversionError, Result};
    use crate::biometric_pipeline::conversions::{ConversionRequest, IsoToImagePipeline, RequestEnvelope};
    use crate::biometric_pipeline::formats::{Modality, RasterFormat};
    use crate::biometric_pipeline::iso::{
        fixtures, DecodeError, DecodedBiometric, FingerCompression, InnerEncoding, ModalityDecoder,
    };
    use crate::biometric_pipeline::raster::{ConverterConfig, ImageCodec};
    use crate::biometric_pipeline::wsq::fixtures as wsq_fixtures;

    const GRAY_J2K: &[u8] = include_bytes!("../raster/testdata/gray_8x6.j2k");
    const RGB_JP2: &[u8] = include_bytes!("../raster/testdata/rgb_4x4.jp2");

    const FINGER: &str = "ISO19794_4_2011";
    const FACE: &str = "ISO19794_5_2011";
    const IRIS: &str = "ISO19794_6_2011";

    struct MockDecoder {
        should_fail: bool,
        encoding: InnerEncoding,
        calls: Arc<Mutex<Vec<Modality>>>,
    }

    impl MockDecoder {
        fn new(encoding: InnerEncoding) -> Self {
            Self {
                should_fail: false,
                encoding,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ModalityDecoder for MockDecoder {
        fn decode(
            &self,
            modality: Modality,
            _version: &str,
            _data: &[u8],
        ) -> std::result::Result<DecodedBiometric, DecodeError> {
            self.calls.lock().unwrap().push(modality);
            if self.should_fail {
                return Err(DecodeError::NoRepresentation);
            }
            Ok(DecodedBiometric {
                inner_encoding: self.encoding,
                image_bytes: b"mock image".to_vec(),
            })
        }
    }

    struct MockCodec {
        should_fail: bool,
        size: (u32, u32),
        decoded: Arc<Mutex<Vec<&'static str>>>,
    }

    impl MockCodec {
        fn new() -> Self {
            Self {
                should_fail: false,
                size: (8, 8),
                decoded: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn raster(&self, path: &'static str) -> Result<DynamicImage> {
            self.decoded.lock().unwrap().push(path);
            if self.should_fail {
                return Err(ConversionError::CouldNotReadIsoImageData(
                    "Mock decode error".to_string(),
                ));
            }
            let (width, height) = self.size;
            Ok(DynamicImage::ImageLuma8(GrayImage::from_pixel(
                width,
                height,
                Luma([7]),
            )))
        }
    }

    impl ImageCodec for MockCodec {
        fn decode_image(&self, _data: &[u8]) -> Result<DynamicImage> {
            self.raster("container")
        }

        fn decode_wsq(&self, _data: &[u8], _config: &ConverterConfig) -> Result<DynamicImage> {
            self.raster("wsq")
        }

        fn encode_image(
            &self,
            image: &DynamicImage,
            format: RasterFormat,
            _config: &ConverterConfig,
        ) -> Result<Vec<u8>> {
            let mut out = format.magic().to_vec();
            out.extend_from_slice(&image.width().to_be_bytes());
            Ok(out)
        }
    }

    fn values(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn encoded(record: &[u8]) -> String {
        base64url::encode(record)
    }

    fn j2k_finger() -> InnerEncoding {
        InnerEncoding::Finger(FingerCompression::Jpeg2000Lossy)
    }

    #[test]
    fn test_successful_conversion_keeps_keys() {
        let decoder = MockDecoder::new(j2k_finger());
        let calls = decoder.calls.clone();
        let pipeline =
            IsoToImagePipeline::with_custom(decoder, MockCodec::new(), ConverterConfig::default());
        let input = values(&[("left", "AAAA"), ("right", "AAAA")]);

        let output = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), None, None)
            .unwrap();

        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["left", "right"]);
        for value in output.values() {
            let bytes = base64url::decode(value).unwrap();
            assert!(bytes.starts_with(RasterFormat::Png.magic()));
        }
        assert_eq!(*calls.lock().unwrap(), vec![Modality::Finger, Modality::Finger]);
    }

    #[test]
    fn test_missing_or_empty_values_win_over_format_errors() {
        let pipeline = IsoToImagePipeline::with_custom(
            MockDecoder::new(j2k_finger()),
            MockCodec::new(),
            ConverterConfig::default(),
        );
        let empty = BTreeMap::new();

        assert_eq!(
            pipeline.convert(None, Some("bogus"), None, None, None).unwrap_err(),
            ConversionError::InputSource
        );
        assert_eq!(
            pipeline.convert(Some(&empty), None, Some("bogus"), None, None).unwrap_err(),
            ConversionError::InvalidRequest
        );
        assert_eq!(
            pipeline.convert(Some(&empty), Some(FINGER), Some("IMAGE/JPEG"), None, None).unwrap_err(),
            ConversionError::InvalidRequest
        );
    }

    #[test]
    fn test_format_code_validation() {
        let pipeline = IsoToImagePipeline::with_custom(
            MockDecoder::new(j2k_finger()),
            MockCodec::new(),
            ConverterConfig::default(),
        );
        let input = values(&[("k", "AAAA")]);

        assert_eq!(
            pipeline.convert(Some(&input), None, Some("IMAGE/JPEG"), None, None).unwrap_err(),
            ConversionError::InputSource
        );
        assert_eq!(
            pipeline.convert(Some(&input), Some(FINGER), None, None, None).unwrap_err(),
            ConversionError::InputSource
        );
        assert_eq!(
            pipeline
                .convert(Some(&input), Some("ISO19794_3_2011"), Some("IMAGE/JPEG"), None, None)
                .unwrap_err(),
            ConversionError::InvalidSourceFormat
        );
        assert_eq!(
            pipeline.convert(Some(&input), Some(FINGER), Some(" "), None, None).unwrap_err(),
            ConversionError::InvalidTargetFormat
        );
    }

    #[test]
    fn test_iris_to_iso_jpeg_is_rejected_before_decoding() {
        let decoder = MockDecoder::new(j2k_finger());
        let calls = decoder.calls.clone();
        let pipeline =
            IsoToImagePipeline::with_custom(decoder, MockCodec::new(), ConverterConfig::default());
        let record = encoded(&fixtures::iris_record(0x0E, &fixtures::gray_png(4, 4)));
        let input = values(&[("iris", record.as_str())]);

        let err = pipeline
            .convert(Some(&input), Some(IRIS), Some("ISO19794_6_2011/JPEG"), None, None)
            .unwrap_err();

        assert_eq!(err.code(), "MOS-CNV-011");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_base64_never_reaches_decoder() {
        let decoder = MockDecoder::new(j2k_finger());
        let calls = decoder.calls.clone();
        let pipeline =
            IsoToImagePipeline::with_custom(decoder, MockCodec::new(), ConverterConfig::default());
        let input = values(&[("k", "not-base64!!")]);

        let err = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/JPEG"), None, None)
            .unwrap_err();

        assert!(matches!(err, ConversionError::SourceNotValidBase64(_)));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_first_failing_entry_aborts_request() {
        let decoder = MockDecoder::new(j2k_finger());
        let calls = decoder.calls.clone();
        let pipeline =
            IsoToImagePipeline::with_custom(decoder, MockCodec::new(), ConverterConfig::default());
        let input = values(&[("a", "AAAA"), ("b", "  "), ("c", "AAAA")]);

        let err = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/JPEG"), None, None)
            .unwrap_err();

        assert_eq!(err, ConversionError::SourceValueEmpty);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_decoder_failure_maps_by_modality() {
        let mut decoder = MockDecoder::new(j2k_finger());
        decoder.should_fail = true;
        let pipeline =
            IsoToImagePipeline::with_custom(decoder, MockCodec::new(), ConverterConfig::default());
        let input = values(&[("k", "AAAA")]);

        let err = pipeline
            .convert(Some(&input), Some(FACE), Some("IMAGE/PNG"), None, None)
            .unwrap_err();

        assert!(matches!(err, ConversionError::SourceNotValidFaceIso(_)));
    }

    #[test]
    fn test_unsupported_compression_skips_codec() {
        let codec = MockCodec::new();
        let decoded = codec.decoded.clone();
        let pipeline = IsoToImagePipeline::with_custom(
            MockDecoder::new(InnerEncoding::Finger(FingerCompression::Jpeg)),
            codec,
            ConverterConfig::default(),
        );
        let input = values(&[("k", "AAAA")]);

        let err = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), None, None)
            .unwrap_err();

        assert_eq!(err.code(), "MOS-CNV-012");
        assert!(decoded.lock().unwrap().is_empty());
    }

    #[test]
    fn test_wsq_and_container_paths() {
        for (compression, path) in [
            (FingerCompression::Wsq, "wsq"),
            (FingerCompression::Jpeg2000Lossless, "container"),
        ] {
            let codec = MockCodec::new();
            let decoded = codec.decoded.clone();
            let pipeline = IsoToImagePipeline::with_custom(
                MockDecoder::new(InnerEncoding::Finger(compression)),
                codec,
                ConverterConfig::default(),
            );
            let input = values(&[("k", "AAAA")]);

            pipeline
                .convert(Some(&input), Some(FINGER), Some("IMAGE/JPEG"), None, None)
                .unwrap();

            assert_eq!(*decoded.lock().unwrap(), vec![path]);
        }
    }

    #[test]
    fn test_codec_failure() {
        let mut codec = MockCodec::new();
        codec.should_fail = true;
        let pipeline = IsoToImagePipeline::with_custom(
            MockDecoder::new(j2k_finger()),
            codec,
            ConverterConfig::default(),
        );
        let input = values(&[("k", "AAAA")]);

        let err = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/JPEG"), None, None)
            .unwrap_err();

        assert!(matches!(err, ConversionError::CouldNotReadIsoImageData(_)));
    }

    #[test]
    fn test_iso_targets_have_no_raster_encoding() {
        let pipeline = IsoToImagePipeline::with_custom(
            MockDecoder::new(j2k_finger()),
            MockCodec::new(),
            ConverterConfig::default(),
        );
        let input = values(&[("k", "AAAA")]);

        let err = pipeline
            .convert(Some(&input), Some(FINGER), Some("ISO19794_4_2011/PNG"), None, None)
            .unwrap_err();

        assert_eq!(err, ConversionError::InvalidTargetFormat);
    }

    #[test]
    fn test_dimension_validation() {
        let config = ConverterConfig::builder().max_dimension(Some(4)).build();
        let pipeline = IsoToImagePipeline::with_custom(
            MockDecoder::new(j2k_finger()),
            MockCodec::new(),
            config,
        );
        let input = values(&[("k", "AAAA")]);

        let err = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), None, None)
            .unwrap_err();
        assert!(matches!(err, ConversionError::CouldNotReadIsoImageData(_)));

        let mut pipeline = pipeline;
        pipeline.set_config(ConverterConfig::builder().validate_dimensions(false).build());
        assert!(!pipeline.config().validate_dimensions);
        assert!(pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), None, None)
            .is_ok());
    }

    #[test]
    fn test_zero_sized_raster_is_rejected() {
        let mut codec = MockCodec::new();
        codec.size = (0, 8);
        let pipeline = IsoToImagePipeline::with_custom(
            MockDecoder::new(j2k_finger()),
            codec,
            ConverterConfig::default(),
        );
        let input = values(&[("k", "AAAA")]);

        assert!(matches!(
            pipeline.convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), None, None),
            Err(ConversionError::CouldNotReadIsoImageData(_))
        ));
    }

    #[test]
    fn test_parameters_do_not_change_output() {
        let pipeline = IsoToImagePipeline::with_custom(
            MockDecoder::new(j2k_finger()),
            MockCodec::new(),
            ConverterConfig::default(),
        );
        let input = values(&[("k", "AAAA")]);
        let params = values(&[("dpi", "500"), ("colour", "blue")]);

        let plain = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), None, None)
            .unwrap();
        let with_params = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), Some(&params), Some(&params))
            .unwrap();

        assert_eq!(plain, with_params);
    }

    #[test]
    fn test_finger_record_to_jpeg() {
        let pipeline = IsoToImagePipeline::new(ConverterConfig::default());
        let record = fixtures::finger_record(4, &fixtures::gray_png(16, 12));
        let input = values(&[("thumb", encoded(&record).as_str())]);

        let first = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/JPEG"), None, None)
            .unwrap();
        let second = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/JPEG"), None, None)
            .unwrap();

        let jpeg = base64url::decode(&first["thumb"]).unwrap();
        assert!(jpeg.starts_with(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert_eq!(first, second);

        let image = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((image.width(), image.height()), (16, 12));
    }

    #[test]
    fn test_face_and_iris_records_to_png() {
        let pipeline = IsoToImagePipeline::new(ConverterConfig::default());
        let face = encoded(&fixtures::face_record(1, &fixtures::gray_png(10, 10)));
        let iris = encoded(&fixtures::iris_record(0x0E, &fixtures::gray_png(6, 4)));

        for (source, value, size) in [(FACE, face, (10, 10)), (IRIS, iris, (6, 4))] {
            let input = values(&[("k", value.as_str())]);
            let output = pipeline
                .convert(Some(&input), Some(source), Some("image/png"), None, None)
                .unwrap();

            let png = base64url::decode(&output["k"]).unwrap();
            assert!(png.starts_with(&[0x89, 0x50, 0x4E, 0x47]));
            let image = image::load_from_memory(&png).unwrap();
            assert_eq!((image.width(), image.height()), size);
        }
    }

    #[test]
    fn test_wsq_finger_record_to_png() {
        let pipeline = IsoToImagePipeline::new(ConverterConfig::default());
        let record = fixtures::finger_record(2, &wsq_fixtures::flat_image(20, 16, 128));
        let input = values(&[("index", encoded(&record).as_str())]);

        let output = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), None, None)
            .unwrap();

        let png = base64url::decode(&output["index"]).unwrap();
        let image = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(image.dimensions(), (20, 16));
        assert!(image.pixels().all(|p| p.0[0] == 128));
    }

    #[test]
    fn test_iris_jpeg2000_record_to_jpeg() {
        let pipeline = IsoToImagePipeline::new(ConverterConfig::default());
        let record = fixtures::iris_record(0x0E, GRAY_J2K);
        let input = values(&[("left_eye", encoded(&record).as_str())]);

        let output = pipeline
            .convert(Some(&input), Some(IRIS), Some("IMAGE/JPEG"), None, None)
            .unwrap();

        let jpeg = base64url::decode(&output["left_eye"]).unwrap();
        assert!(jpeg.starts_with(&[0xFF, 0xD8, 0xFF, 0xE0]));
        let image = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((image.width(), image.height()), (8, 6));
    }

    #[test]
    fn test_jpeg2000_records_to_lossless_png() {
        let pipeline = IsoToImagePipeline::new(ConverterConfig::default());
        let finger = encoded(&fixtures::finger_record(5, RGB_JP2));
        let face = encoded(&fixtures::face_record(2, GRAY_J2K));

        let output = pipeline
            .convert(Some(&values(&[("k", finger.as_str())])), Some(FINGER), Some("IMAGE/PNG"), None, None)
            .unwrap();
        let png = base64url::decode(&output["k"]).unwrap();
        let rgb = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(rgb.get_pixel(3, 2).0, [180, 120, 200]);

        let output = pipeline
            .convert(Some(&values(&[("k", face.as_str())])), Some(FACE), Some("IMAGE/PNG"), None, None)
            .unwrap();
        let png = base64url::decode(&output["k"]).unwrap();
        let gray = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(gray.get_pixel(7, 5).0, [230]);
    }

    #[test]
    fn test_oversized_wsq_frame_fails_fast() {
        let pipeline = IsoToImagePipeline::new(ConverterConfig::default());

        for (width, height) in [(20_001, 12_000), (u16::MAX, u16::MAX)] {
            let record = fixtures::finger_record(2, &wsq_fixtures::flat_image(width, height, 128));
            let input = values(&[("k", encoded(&record).as_str())]);

            let err = pipeline
                .convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), None, None)
                .unwrap_err();

            assert_eq!(err.code(), "MOS-CNV-007");
            assert!(err.to_string().contains("exceeds maximum dimension"));
        }
    }

    #[test]
    fn test_unsupported_inner_compression_in_real_record() {
        let pipeline = IsoToImagePipeline::new(ConverterConfig::default());
        let record = fixtures::finger_record(6, &fixtures::gray_png(4, 4));
        let input = values(&[("k", encoded(&record).as_str())]);

        let err = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), None, None)
            .unwrap_err();

        assert!(matches!(err, ConversionError::UnsupportedCompressionType(_)));
    }

    #[test]
    fn test_record_of_wrong_modality() {
        let pipeline = IsoToImagePipeline::new(ConverterConfig::default());
        let record = fixtures::face_record(1, &fixtures::gray_png(4, 4));
        let input = values(&[("k", encoded(&record).as_str())]);

        let err = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/PNG"), None, None)
            .unwrap_err();

        assert_eq!(err.code(), "MOS-CNV-008");
    }

    #[test]
    fn test_corrupt_embedded_image() {
        let pipeline = IsoToImagePipeline::new(ConverterConfig::default());
        let record = fixtures::finger_record(5, b"not an image at all");
        let input = values(&[("k", encoded(&record).as_str())]);

        let err = pipeline
            .convert(Some(&input), Some(FINGER), Some("IMAGE/JPEG"), None, None)
            .unwrap_err();

        assert_eq!(err.code(), "MOS-CNV-007");
    }

    #[test]
    fn test_convert_request_from_json() {
        let record = encoded(&fixtures::finger_record(4, &fixtures::gray_png(8, 8)));
        let json = format!(
            r#"{{"id":"mosip.converter","version":"1.0","request":{{"values":{{"k":"{record}"}},"sourceFormat":"ISO19794_4_2011","targetFormat":"IMAGE/PNG"}}}}"#
        );
        let envelope: RequestEnvelope = serde_json::from_str(&json).unwrap();
        let pipeline = IsoToImagePipeline::new(ConverterConfig::default());

        let output = pipeline
            .convert_request(envelope.request.as_ref().unwrap())
            .unwrap();
        assert!(base64url::decode(&output["k"]).unwrap().starts_with(RasterFormat::Png.magic()));

        let missing = pipeline.convert_request(&ConversionRequest::default()).unwrap_err();
        assert_eq!(missing, ConversionError::InputSource);
    }
}
