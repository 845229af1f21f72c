use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::tempdir;

use crate::image_pipeline::codec::{self, DatasetCodec, Encoding};
use crate::image_pipeline::common::error::{LidxError, Result};
use crate::image_pipeline::conversions::{
    find_image_files, load_png_features, mnist_to_dataset, synthetic_digits, MnistToLidxPipeline,
    Placement, PngFeatureLoader, DIGIT_GLYPHS,
};
use crate::image_pipeline::dataset::LabeledDataset;
use crate::image_pipeline::features::FeatureConfig;
use crate::image_pipeline::raster::{MnistImages, MnistSource, PixelGrid};
use crate::image_pipeline::test_support::{gray16_png_bytes, mnist_image_bytes, mnist_label_bytes};

struct MockSource {
    should_fail: bool,
    labels: Vec<u8>,
    images: Option<MnistImages>,
}

impl MockSource {
    fn with_images(labels: Vec<u8>, rows: usize, cols: usize, pixels: Vec<Vec<u16>>) -> Self {
        let grids = pixels
            .into_iter()
            .map(|data| PixelGrid::new(cols, rows, data, 8).unwrap())
            .collect();
        Self {
            should_fail: false,
            labels,
            images: Some(MnistImages { rows, cols, grids }),
        }
    }
}

impl MnistSource for MockSource {
    fn decode_labels(&self, _data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.labels.clone())
    }

    fn decode_images(&self, _data: &[u8]) -> Result<MnistImages> {
        self.images
            .clone()
            .ok_or_else(|| LidxError::FormatError("no images".to_string()))
    }

    fn decode_pair(&self, _label_path: &Path, _image_path: &Path) -> Result<(Vec<u8>, MnistImages)> {
        if self.should_fail {
            return Err(LidxError::FormatError("Mock decode error".to_string()));
        }
        Ok((self.decode_labels(&[])?, self.decode_images(&[])?))
    }
}

struct MockCodec {
    should_fail: bool,
    encoded: Arc<Mutex<Vec<LabeledDataset>>>,
}

impl DatasetCodec for MockCodec {
    fn encoding(&self) -> Encoding {
        Encoding::Binary
    }

    fn encode(&self, dataset: &LabeledDataset, _output: &mut dyn Write) -> Result<()> {
        if self.should_fail {
            return Err(LidxError::EncodeError("Mock encode error".to_string()));
        }
        self.encoded.lock().unwrap().push(dataset.clone());
        Ok(())
    }

    fn decode(&self, _input: &mut dyn Read) -> Result<LabeledDataset> {
        Err(LidxError::FormatError("Mock codec cannot decode".to_string()))
    }
}

fn two_digit_source() -> MockSource {
    MockSource::with_images(vec![3, 7], 2, 2, vec![vec![0, 255, 0, 0], vec![10, 20, 30, 40]])
}

#[test]
fn test_mnist_to_dataset_from_files() {
    let dir = tempdir().unwrap();
    let labels = dir.path().join("train-labels");
    let images = dir.path().join("train-images");
    std::fs::write(&labels, mnist_label_bytes(&[3, 7])).unwrap();
    std::fs::write(&images, mnist_image_bytes(2, 2, &[vec![0, 255, 0, 0], vec![10, 20, 30, 40]])).unwrap();

    let dataset = mnist_to_dataset(&labels, &images).unwrap();

    assert_eq!(dataset.dims(), &[2, 2]);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.get(0).unwrap().label(), 3);
    assert_eq!(dataset.get(0).unwrap().data(), &[0, 255, 0, 0]);
    assert_eq!(dataset.get(1).unwrap().label(), 7);
    assert_eq!(dataset.get(1).unwrap().data(), &[10, 20, 30, 40]);
}

#[test]
fn test_mnist_to_dataset_count_mismatch() {
    let dir = tempdir().unwrap();
    let labels = dir.path().join("labels");
    let images = dir.path().join("images");
    std::fs::write(&labels, mnist_label_bytes(&[1, 2, 3])).unwrap();
    std::fs::write(&images, mnist_image_bytes(2, 2, &[vec![0; 4], vec![0; 4]])).unwrap();

    let result = mnist_to_dataset(&labels, &images);
    assert!(matches!(result.unwrap_err(), LidxError::FormatError(_)));
}

#[test]
fn test_pipeline_successful_conversion() {
    let encoded = Arc::new(Mutex::new(Vec::new()));
    let codec = MockCodec { should_fail: false, encoded: encoded.clone() };
    let pipeline = MnistToLidxPipeline::with_custom(two_digit_source(), codec, None);

    let dir = tempdir().unwrap();
    let written = pipeline
        .convert_file("labels", "images", dir.path().join("out.lidx"))
        .unwrap();

    assert_eq!(written, 2);
    let encoded = encoded.lock().unwrap();
    assert_eq!(encoded.len(), 1);
    assert_eq!(encoded[0].dims(), &[2, 2]);
    assert_eq!(encoded[0].label_set().into_iter().collect::<Vec<_>>(), vec![3, 7]);
}

#[test]
fn test_pipeline_source_failure() {
    let encoded = Arc::new(Mutex::new(Vec::new()));
    let source = MockSource { should_fail: true, labels: Vec::new(), images: None };
    let codec = MockCodec { should_fail: false, encoded: encoded.clone() };
    let pipeline = MnistToLidxPipeline::with_custom(source, codec, None);

    let dir = tempdir().unwrap();
    let result = pipeline.convert_file("labels", "images", dir.path().join("out.lidx"));

    assert!(matches!(result.unwrap_err(), LidxError::FormatError(_)));
    assert!(encoded.lock().unwrap().is_empty());
}

#[test]
fn test_pipeline_codec_failure() {
    let codec = MockCodec { should_fail: true, encoded: Arc::new(Mutex::new(Vec::new())) };
    let pipeline = MnistToLidxPipeline::with_custom(two_digit_source(), codec, None);

    let dir = tempdir().unwrap();
    let result = pipeline.convert_file("labels", "images", dir.path().join("out.lidx"));

    assert!(matches!(result.unwrap_err(), LidxError::EncodeError(_)));
}

#[test]
fn test_pipeline_with_feature_extraction() {
    let image = vec![
        200, 200, 0, 0,
        200, 200, 0, 0,
        0, 0, 0, 0,
        0, 0, 0, 50,
    ];
    let source = MockSource::with_images(vec![5], 4, 4, vec![image]);
    let config = FeatureConfig::builder()
        .weighted(false)
        .threshold(100)
        .downscale(2)
        .build();
    let codec = MockCodec { should_fail: false, encoded: Arc::new(Mutex::new(Vec::new())) };
    let pipeline = MnistToLidxPipeline::with_custom(source, codec, None).with_features(config);

    assert_eq!(pipeline.features(), Some(&config));
    let dataset = pipeline.build_dataset(Path::new("l"), Path::new("i")).unwrap();

    assert_eq!(dataset.dims(), &[2, 2]);
    assert_eq!(dataset.get(0).unwrap().label(), 5);
    assert_eq!(dataset.get(0).unwrap().data(), &[255, 0, 0, 0]);
}

#[test]
fn test_pipeline_writes_readable_file() {
    let dir = tempdir().unwrap();
    let labels = dir.path().join("labels");
    let images = dir.path().join("images");
    let output = dir.path().join("mnist.lidx.gz");
    std::fs::write(&labels, mnist_label_bytes(&[3, 7])).unwrap();
    std::fs::write(&images, mnist_image_bytes(2, 2, &[vec![0, 255, 0, 0], vec![10, 20, 30, 40]])).unwrap();

    let pipeline = MnistToLidxPipeline::new(Encoding::Binary);
    assert_eq!(pipeline.encoding(), Encoding::Binary);
    assert_eq!(pipeline.convert_file(&labels, &images, &output).unwrap(), 2);

    let restored = codec::read(&output, Encoding::Binary).unwrap();
    assert_eq!(restored, mnist_to_dataset(&labels, &images).unwrap());
}

#[test]
fn test_synthetic_digits_shape_and_order() {
    let dataset = synthetic_digits(3, &[8, 6], Placement::Random, 42).unwrap();

    assert_eq!(dataset.dims(), &[8, 6]);
    assert_eq!(dataset.len(), 30);
    for (i, record) in dataset.iter().enumerate() {
        let digit = i % 10;
        assert_eq!(record.label(), digit as i32);
        assert_eq!(record.len(), 48);
        let stamped: i32 = record.data().iter().sum();
        let glyph: i32 = DIGIT_GLYPHS[digit].iter().sum();
        assert_eq!(stamped, glyph);
        assert!(record.data().iter().all(|&v| v == 0 || v == 1));
    }
}

#[test]
fn test_synthetic_digits_deterministic_per_seed() {
    let a = synthetic_digits(5, &[10, 10], Placement::Random, 7).unwrap();
    let b = synthetic_digits(5, &[10, 10], Placement::Random, 7).unwrap();
    let c = synthetic_digits(5, &[10, 10], Placement::Random, 8).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_synthetic_digits_fixed_both_is_centred() {
    let dataset = synthetic_digits(2, &[9, 7], Placement::FixedBoth, 1).unwrap();

    // Free space is 4 rows by 4 columns, so the glyph starts at (2, 2).
    let eight = dataset.get(8).unwrap();
    for (y, row) in DIGIT_GLYPHS[8].chunks(3).enumerate() {
        for (x, &v) in row.iter().enumerate() {
            assert_eq!(eight.at(y + 2, x + 2, 7), Some(v));
        }
    }
    assert_eq!(dataset.get(8).unwrap(), dataset.get(18).unwrap());
}

fn first_lit_row(data: &[i32], cols: usize) -> usize {
    data.chunks(cols).position(|row| row.contains(&1)).unwrap()
}

fn first_lit_col(data: &[i32], cols: usize) -> usize {
    (0..cols)
        .find(|&c| data.chunks(cols).any(|row| row[c] == 1))
        .unwrap()
}

#[test]
fn test_synthetic_digits_fixed_axis_placement() {
    let rows = 11;
    let cols = 9;

    let fixed_row = synthetic_digits(4, &[rows as u16, cols as u16], Placement::FixedRow, 3).unwrap();
    for record in fixed_row.iter() {
        assert_eq!(first_lit_row(record.data(), cols), (rows - 5) / 2);
    }

    let fixed_col = synthetic_digits(4, &[rows as u16, cols as u16], Placement::FixedCol, 3).unwrap();
    for record in fixed_col.iter().filter(|r| r.label() == 0) {
        assert_eq!(first_lit_col(record.data(), cols), (cols - 3) / 2);
    }
}

#[test]
fn test_synthetic_digits_exact_glyph_canvas() {
    let dataset = synthetic_digits(1, &[5, 3], Placement::Random, 0).unwrap();
    for (digit, record) in dataset.iter().enumerate() {
        assert_eq!(record.data(), &DIGIT_GLYPHS[digit]);
    }
}

#[test]
fn test_synthetic_digits_zero_count() {
    let dataset = synthetic_digits(0, &[28, 28], Placement::Random, 0).unwrap();
    assert!(dataset.is_empty());
    assert_eq!(dataset.dims(), &[28, 28]);
}

#[test]
fn test_synthetic_digits_invalid_canvas() {
    assert!(matches!(
        synthetic_digits(1, &[4, 10], Placement::Random, 0).unwrap_err(),
        LidxError::InvalidConfig(_)
    ));
    assert!(matches!(
        synthetic_digits(1, &[10, 2], Placement::Random, 0).unwrap_err(),
        LidxError::InvalidConfig(_)
    ));
    assert!(matches!(
        synthetic_digits(1, &[28, 28, 1], Placement::Random, 0).unwrap_err(),
        LidxError::InvalidConfig(_)
    ));
}

fn write_png(path: &Path, samples: Vec<u16>) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, gray16_png_bytes(2, 2, samples)).unwrap();
}

#[test]
fn test_find_image_files_sorted_and_filtered() {
    let dir = tempdir().unwrap();
    write_png(&dir.path().join("b.png"), vec![0; 4]);
    write_png(&dir.path().join("nested/a.png"), vec![0; 4]);
    std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

    let files = find_image_files(dir.path(), ".png").unwrap();

    assert_eq!(files, vec![dir.path().join("b.png"), dir.path().join("nested/a.png")]);
}

#[test]
fn test_find_image_files_missing_root() {
    let dir = tempdir().unwrap();
    let result = find_image_files(&dir.path().join("absent"), ".png");
    assert!(matches!(result.unwrap_err(), LidxError::InputReadError(_)));
}

#[test]
fn test_load_png_features_with_limit_and_dump() {
    let dir = tempdir().unwrap();
    let scans = dir.path().join("scans");
    let dumps = dir.path().join("dumps");
    write_png(&scans.join("scan_a.png"), vec![0, 5000, 0, 0]);
    write_png(&scans.join("scan_b.png"), vec![0, 0, 0, 900]);
    write_png(&scans.join("scan_c.png"), vec![2000, 0, 0, 0]);

    let config = FeatureConfig::builder().weighted(false).threshold(1000).build();
    let loaded = load_png_features(&scans, ".png", Some(2), &config, Some(&dumps)).unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].path, scans.join("scan_a.png"));
    assert_eq!(loaded[0].image.pixels(), &[0, 65535, 0, 0]);
    assert_eq!(loaded[1].image.pixels(), &[0, 0, 0, 0]);
    assert!(dumps.join("scan_a.pgm").is_file());
    assert!(dumps.join("scan_b.pgm").is_file());
    assert!(!dumps.join("scan_c.pgm").exists());
}

#[test]
fn test_loader_shuffle_is_seeded() {
    let dir = tempdir().unwrap();
    for i in 0..8 {
        write_png(&dir.path().join(format!("img_{i}.png")), vec![i as u16; 4]);
    }

    let order = |seed| {
        PngFeatureLoader::new(FeatureConfig::default())
            .with_shuffle_seed(seed)
            .load_dir(dir.path(), ".png", None, None)
            .unwrap()
            .into_iter()
            .map(|img| img.path)
            .collect::<Vec<_>>()
    };

    assert_eq!(order(11), order(11));
    let mut sorted = order(11);
    sorted.sort();
    assert_eq!(sorted, find_image_files(dir.path(), ".png").unwrap());
}

#[test]
fn test_loader_propagates_decode_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("broken.png"), b"definitely not a png").unwrap();

    let result = load_png_features(dir.path(), ".png", None, &FeatureConfig::default(), None);
    assert!(matches!(result.unwrap_err(), LidxError::DecodeError(_)));
}
