use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::image_pipeline::{
    common::error::{LidxError, Result},
    dump::{DumpConfig, ImageDumpWriter, PgmDumpWriter},
    features::{ExtractedImage, FeatureConfig, FeatureExtractor},
    raster::{PngReader, RasterReader},
};

/// Recursively lists the files under `root` whose name ends with `extension`,
/// in sorted order.
pub fn find_image_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| LidxError::InputReadError(format!("{}: {}", root.display(), e)))?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(extension) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    debug!(root = %root.display(), found = files.len(), "Image discovery");
    Ok(files)
}

/// An extracted image together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub image: ExtractedImage,
}

/// Discovers, decodes and extracts a directory of images, optionally dumping
/// each extracted image into a directory.
pub struct PngFeatureLoader<R: RasterReader, D: ImageDumpWriter> {
    reader: R,
    dumper: D,
    extractor: FeatureExtractor,
    dump_config: DumpConfig,
    shuffle_seed: Option<u64>,
}

impl PngFeatureLoader<PngReader, PgmDumpWriter> {
    pub fn new(config: FeatureConfig) -> Self {
        Self {
            reader: PngReader::new(),
            dumper: PgmDumpWriter,
            extractor: FeatureExtractor::new(config),
            dump_config: DumpConfig::default(),
            shuffle_seed: None,
        }
    }
}

impl<R: RasterReader, D: ImageDumpWriter> PngFeatureLoader<R, D> {
    pub fn with_custom(reader: R, dumper: D, config: FeatureConfig, dump_config: DumpConfig) -> Self {
        Self {
            reader,
            dumper,
            extractor: FeatureExtractor::new(config),
            dump_config,
            shuffle_seed: None,
        }
    }

    /// Shuffles the discovered files with a seeded RNG before the limit applies.
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn config(&self) -> &FeatureConfig {
        self.extractor.config()
    }

    pub fn load_file(&self, path: &Path) -> Result<ExtractedImage> {
        let grid = self.reader.decode_file(path)?;
        self.extractor.extract(&grid)
    }

    #[instrument(skip(self, root, dump_dir), fields(root = %root.display()))]
    pub fn load_dir(
        &self,
        root: &Path,
        extension: &str,
        limit: Option<usize>,
        dump_dir: Option<&Path>,
    ) -> Result<Vec<LoadedImage>> {
        let mut files = find_image_files(root, extension)?;
        if let Some(seed) = self.shuffle_seed {
            files.shuffle(&mut StdRng::seed_from_u64(seed));
        }
        if let Some(limit) = limit {
            files.truncate(limit);
        }

        let mut loaded = Vec::with_capacity(files.len());
        for path in files {
            let image = {
                let _span = tracing::info_span!("extract_image", path = %path.display()).entered();
                self.load_file(&path)?
            };
            if let Some(dir) = dump_dir {
                let written = self.dumper.dump_into(&image, &path, dir, &self.dump_config)?;
                debug!(dump = %written.display(), "Image dumped");
            }
            loaded.push(LoadedImage { path, image });
        }

        info!(
            images = loaded.len(),
            dumped = dump_dir.is_some(),
            "Feature images loaded"
        );
        Ok(loaded)
    }
}

/// Loads up to `limit` images matching `extension` under `root` with the
/// default PNG reader, dumping PGMs into `dump_dir` when given.
pub fn load_png_features(
    root: &Path,
    extension: &str,
    limit: Option<usize>,
    config: &FeatureConfig,
    dump_dir: Option<&Path>,
) -> Result<Vec<LoadedImage>> {
    PngFeatureLoader::new(*config).load_dir(root, extension, limit, dump_dir)
}
