use lidx_prep_rs::image_pipeline::{
    codec, mnist_to_dataset, synthetic_digits, Encoding, FeatureConfig, LidxError, LidxFile,
    MnistToLidxPipeline, Placement,
};
use tempfile::tempdir;

fn label_file(labels: &[u8]) -> Vec<u8> {
    let mut out = 2049u32.to_be_bytes().to_vec();
    out.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    out.extend_from_slice(labels);
    out
}

fn image_file(rows: u32, cols: u32, images: &[&[u8]]) -> Vec<u8> {
    let mut out = 2051u32.to_be_bytes().to_vec();
    out.extend_from_slice(&(images.len() as u32).to_be_bytes());
    out.extend_from_slice(&rows.to_be_bytes());
    out.extend_from_slice(&cols.to_be_bytes());
    for image in images {
        out.extend_from_slice(image);
    }
    out
}

#[test]
fn mnist_pair_survives_gzip_binary_round_trip() {
    let dir = tempdir().unwrap();
    let labels = dir.path().join("t10k-labels-idx1-ubyte");
    let images = dir.path().join("t10k-images-idx3-ubyte");
    std::fs::write(&labels, label_file(&[3, 7])).unwrap();
    std::fs::write(&images, image_file(2, 2, &[&[0, 255, 0, 0], &[10, 20, 30, 40]])).unwrap();

    let dataset = mnist_to_dataset(&labels, &images).unwrap();
    assert_eq!(dataset.dims(), &[2, 2]);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.dim(0).unwrap(), 2);

    let output = dir.path().join("mnist.lidx.gz");
    codec::write(&output, &dataset, Encoding::Binary).unwrap();

    let raw = std::fs::read(&output).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b]);

    let restored = codec::read(&output, Encoding::Binary).unwrap();
    assert_eq!(restored, dataset);
    assert_eq!(restored.get(0).unwrap().label(), 3);
    assert_eq!(restored.get(0).unwrap().data(), &[0, 255, 0, 0]);
    assert_eq!(restored.get(1).unwrap().label(), 7);
    assert_eq!(restored.get(1).unwrap().data(), &[10, 20, 30, 40]);
    assert!(matches!(restored.get(2).unwrap_err(), LidxError::IndexError { .. }));
}

#[test]
fn feature_pipeline_writes_tagged_text() {
    let dir = tempdir().unwrap();
    let labels = dir.path().join("labels");
    let images = dir.path().join("images");
    let output = dir.path().join("features.lidx");
    std::fs::write(&labels, label_file(&[1])).unwrap();
    std::fs::write(
        &images,
        image_file(4, 4, &[&[
            255, 255, 0, 0,
            255, 255, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ]]),
    )
    .unwrap();

    let config = FeatureConfig::builder()
        .weighted(false)
        .threshold(128)
        .downscale(2)
        .build();
    let pipeline = MnistToLidxPipeline::new(Encoding::TaggedText).with_features(config);
    assert_eq!(pipeline.convert_file(&labels, &images, &output).unwrap(), 1);

    let restored = LidxFile::tagged_text().read(&output).unwrap();
    assert_eq!(restored.dims(), &[2, 2]);
    assert_eq!(restored.get(0).unwrap().data(), &[255, 0, 0, 0]);
}

#[test]
fn synthetic_dataset_round_trips_through_text_gzip() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("synth.lidx.gz");
    let dataset = synthetic_digits(4, &[12, 10], Placement::Random, 2024).unwrap();

    codec::write(&output, &dataset, Encoding::TaggedText).unwrap();
    let restored = codec::read(&output, Encoding::TaggedText).unwrap();

    assert_eq!(restored, dataset);
    assert_eq!(restored.label_set().len(), 10);
}
