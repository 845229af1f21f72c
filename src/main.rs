use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use tracing::{info, warn};

use lidx_prep_rs::image_pipeline::{
    codec, features::AUTO_THRESHOLD, synthetic_digits, Encoding, FeatureConfig, LidxError,
    MnistToLidxPipeline, Placement, PngFeatureLoader,
};
use lidx_prep_rs::logger;

#[derive(Parser)]
#[command(author, version, about = "Prepare labeled image datasets in the LIDX format")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an MNIST label/image pair into a LIDX dataset
    Mnist(MnistArgs),

    /// Generate a dataset of synthetic 3x5 digit glyphs
    Synth(SynthArgs),

    /// Extract features from a directory of PNG images
    Features(FeaturesArgs),

    /// Print the shape and labels of a LIDX file
    Inspect(InspectArgs),
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum EncodingArg {
    Binary,
    #[default]
    TaggedText,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Binary => Encoding::Binary,
            EncodingArg::TaggedText => Encoding::TaggedText,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum PlacementArg {
    #[default]
    Random,
    FixedRow,
    FixedCol,
    FixedBoth,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Random => Placement::Random,
            PlacementArg::FixedRow => Placement::FixedRow,
            PlacementArg::FixedCol => Placement::FixedCol,
            PlacementArg::FixedBoth => Placement::FixedBoth,
        }
    }
}

#[derive(Args)]
struct FeatureArgs {
    /// Binarize pixels against --threshold instead of keeping intensities
    #[arg(long)]
    binarize: bool,

    /// Binarization cutoff in the source's intensity range (0..=255 for
    /// MNIST). Omitted or 0 picks one from each image's histogram
    #[arg(long)]
    threshold: Option<u16>,

    /// Mean-pool blocks of this size (0 or 1 keeps full resolution)
    #[arg(long, default_value_t = 1)]
    downscale: u32,

    /// Report centroid distances relative to the image diagonal
    #[arg(long)]
    normalize_distance: bool,
}

impl FeatureArgs {
    fn config(&self) -> FeatureConfig {
        FeatureConfig::builder()
            .weighted(!self.binarize)
            .threshold(self.threshold.unwrap_or(AUTO_THRESHOLD))
            .downscale(self.downscale)
            .normalize_distance(self.normalize_distance)
            .build()
    }

    fn is_identity(&self) -> bool {
        !self.binarize && self.downscale <= 1
    }
}

#[derive(Args)]
struct MnistArgs {
    /// MNIST label file (idx1-ubyte)
    #[arg(long, value_hint = ValueHint::FilePath)]
    labels: PathBuf,

    /// MNIST image file (idx3-ubyte)
    #[arg(long, value_hint = ValueHint::FilePath)]
    images: PathBuf,

    /// Destination LIDX file; a `.gz` suffix enables gzip
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    encoding: EncodingArg,

    #[command(flatten)]
    features: FeatureArgs,
}

#[derive(Args)]
struct SynthArgs {
    /// Destination LIDX file; a `.gz` suffix enables gzip
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Repetitions of the ten digits
    #[arg(long, default_value_t = 100)]
    count: usize,

    #[arg(long, default_value_t = 28)]
    rows: u16,

    #[arg(long, default_value_t = 28)]
    cols: u16,

    #[arg(long, value_enum, default_value_t)]
    placement: PlacementArg,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value_t)]
    encoding: EncodingArg,
}

#[derive(Args)]
struct FeaturesArgs {
    /// Directory searched recursively for images
    #[arg(long, value_hint = ValueHint::DirPath)]
    dir: PathBuf,

    /// File name suffix of the images to load
    #[arg(long, default_value = ".png")]
    ext: String,

    /// Load at most this many images
    #[arg(long)]
    limit: Option<usize>,

    /// Shuffle the discovered files with this seed before applying --limit
    #[arg(long)]
    seed: Option<u64>,

    /// Write each extracted image as a PGM into this directory
    #[arg(long, value_hint = ValueHint::DirPath)]
    dump_dir: Option<PathBuf>,

    #[command(flatten)]
    features: FeatureArgs,
}

#[derive(Args)]
struct InspectArgs {
    /// LIDX file to read; a `.gz` suffix enables gzip
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    encoding: EncodingArg,

    /// Also print the first N records
    #[arg(long, default_value_t = 0)]
    head: usize,
}

fn run_mnist(args: MnistArgs) -> Result<()> {
    let mut pipeline = MnistToLidxPipeline::new(args.encoding.into());
    if !args.features.is_identity() {
        pipeline = pipeline.with_features(args.features.config());
    }

    let written = pipeline
        .convert_file(&args.labels, &args.images, &args.output)
        .with_context(|| format!("converting {} and {}", args.labels.display(), args.images.display()))?;

    info!(records = written, output = %args.output.display(), "MNIST conversion complete");
    Ok(())
}

fn run_synth(args: SynthArgs) -> Result<()> {
    let dataset = synthetic_digits(args.count, &[args.rows, args.cols], args.placement.into(), args.seed)
        .context("generating synthetic digits")?;

    codec::write(&args.output, &dataset, args.encoding.into())
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(records = dataset.len(), output = %args.output.display(), "Synthetic dataset written");
    Ok(())
}

fn run_features(args: FeaturesArgs) -> Result<()> {
    let mut loader = PngFeatureLoader::new(args.features.config());
    if let Some(seed) = args.seed {
        loader = loader.with_shuffle_seed(seed);
    }

    let loaded = loader
        .load_dir(&args.dir, &args.ext, args.limit, args.dump_dir.as_deref())
        .with_context(|| format!("loading images under {}", args.dir.display()))?;

    for item in &loaded {
        let image = &item.image;
        match image.centroid() {
            Ok(c) => {
                let (cx, cy) = (image.width() as f64 / 2.0, image.height() as f64 / 2.0);
                let distance = image.distance_to_centroid(cx, cy)?;
                println!(
                    "{}\t{}x{}\tcentroid=({:.2}, {:.2})\tcentre_distance={:.4}",
                    item.path.display(),
                    image.width(),
                    image.height(),
                    c.x,
                    c.y,
                    distance
                );
            }
            Err(LidxError::EmptyImage) => {
                warn!(path = %item.path.display(), "No foreground pixels, centroid undefined");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let dataset = codec::read(&args.input, args.encoding.into())
        .with_context(|| format!("reading {}", args.input.display()))?;

    println!("dims:    {:?}", dataset.dims());
    println!("records: {}", dataset.len());
    println!("labels:  {:?}", dataset.label_set());
    for (i, record) in dataset.iter().take(args.head).enumerate() {
        println!("[{i}] label={} data={:?}", record.label(), record.data());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        logger::init_with_default("debug");
    } else {
        logger::init();
    }

    match cli.command {
        Command::Mnist(args) => run_mnist(args),
        Command::Synth(args) => run_synth(args),
        Command::Features(args) => run_features(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    fn mnist_features(extra: &[&str]) -> lidx_prep_rs::image_pipeline::FeatureConfig {
        let mut argv = vec!["lidx", "mnist", "--labels", "l", "--images", "i", "-o", "out.lidx"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Mnist(args) => args.features.config(),
            _ => panic!("expected the mnist subcommand"),
        }
    }

    #[test]
    fn test_binarize_without_threshold_is_automatic() {
        let config = mnist_features(&["--binarize"]);
        assert!(!config.weighted);
        assert!(config.is_auto_threshold());
    }

    #[test]
    fn test_explicit_threshold_is_kept() {
        let config = mnist_features(&["--binarize", "--threshold", "128"]);
        assert_eq!(config.threshold, 128);
        assert!(!config.is_auto_threshold());
    }
}
